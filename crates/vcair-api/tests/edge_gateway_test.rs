#![allow(clippy::unwrap_used)]
// Integration tests for `EdgeGateway` using wiremock.

use pretty_assertions::assert_eq;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use vcair_api::types::{
    ExternalIpAddressActionList, FirewallRule, NatRule, ServiceConfiguration, TaskStatus,
};
use vcair_api::{EdgeGateway, Error, VcaClient, xml};

const GATEWAY_PATH: &str = "/api/admin/edgeGateway/gw-1";
const CONFIGURE_PATH: &str = "/api/admin/edgeGateway/gw-1/action/configureServices";
const MANAGE_IPS_PATH: &str = "/api/admin/edgeGateway/gw-1/action/manageExternalIpAddresses";

// ── Fixtures ────────────────────────────────────────────────────────

fn uplink_href(server: &MockServer) -> String {
    format!("{}/api/admin/network/ext-1", server.uri())
}

fn interface(name: &str, kind: &str, network_href: &str) -> String {
    format!(
        r#"
      <GatewayInterface>
        <Name>{name}</Name>
        <DisplayName>{name}</DisplayName>
        <Network type="application/vnd.vmware.admin.network+xml" name="{name}" href="{network_href}"/>
        <InterfaceType>{kind}</InterfaceType>
        <UseForDefaultRoute>false</UseForDefaultRoute>
      </GatewayInterface>"#
    )
}

/// A user DNAT port forward on the uplink that must survive every rewrite.
fn port_forward(uplink: &str) -> String {
    format!(
        r#"
        <NatRule>
          <Description>ssh forward</Description>
          <RuleType>DNAT</RuleType>
          <IsEnabled>true</IsEnabled>
          <Id>65537</Id>
          <GatewayNatRule>
            <Interface type="application/vnd.vmware.admin.network+xml" name="internet" href="{uplink}"/>
            <OriginalIp>203.0.113.9</OriginalIp>
            <OriginalPort>2222</OriginalPort>
            <TranslatedIp>10.0.0.5</TranslatedIp>
            <TranslatedPort>22</TranslatedPort>
            <Protocol>tcp</Protocol>
          </GatewayNatRule>
        </NatRule>"#
    )
}

const USER_FIREWALL_RULE: &str = r"
        <FirewallRule>
          <Id>1</Id>
          <IsEnabled>true</IsEnabled>
          <MatchOnTranslate>false</MatchOnTranslate>
          <Description>ssh in</Description>
          <Policy>allow</Policy>
          <Protocols><Tcp>true</Tcp></Protocols>
          <Port>22</Port>
          <DestinationPortRange>22</DestinationPortRange>
          <DestinationIp>203.0.113.9</DestinationIp>
          <SourcePort>-1</SourcePort>
          <SourcePortRange>Any</SourcePortRange>
          <SourceIp>Any</SourceIp>
          <EnableLogging>false</EnableLogging>
        </FirewallRule>";

fn gateway_xml(server: &MockServer, interfaces: &str, nat_rules: &str, fw_rules: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<EdgeGateway xmlns="http://www.vmware.com/vcloud/v1.5" status="1" name="gw-1" id="urn:vcloud:gateway:gw-1" type="application/vnd.vmware.admin.edgeGateway+xml" href="{uri}{GATEWAY_PATH}">
  <Description/>
  <Configuration>
    <GatewayBackingConfig>compact</GatewayBackingConfig>
    <GatewayInterfaces>{interfaces}
    </GatewayInterfaces>
    <EdgeGatewayServiceConfiguration>
      <FirewallService>
        <IsEnabled>true</IsEnabled>
        <DefaultAction>drop</DefaultAction>
        <LogDefaultAction>false</LogDefaultAction>{fw_rules}
      </FirewallService>
      <NatService>
        <IsEnabled>true</IsEnabled>{nat_rules}
      </NatService>
    </EdgeGatewayServiceConfiguration>
    <HaEnabled>false</HaEnabled>
    <UseDefaultRouteForDnsRelay>false</UseDefaultRouteForDnsRelay>
  </Configuration>
</EdgeGateway>"#,
        uri = server.uri()
    )
}

fn default_gateway_xml(server: &MockServer) -> String {
    let uplink = uplink_href(server);
    gateway_xml(
        server,
        &format!(
            "{}{}",
            interface("internet", "uplink", &uplink),
            interface("default-routed", "internal", "https://elsewhere/network/int-1"),
        ),
        &port_forward(&uplink),
        USER_FIREWALL_RULE,
    )
}

fn task_xml(server: &MockServer, status: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<Task xmlns="http://www.vmware.com/vcloud/v1.5" status="{status}" operationName="networkConfigureEdgeGatewayServices" operation="Updating services EdgeGateway gw-1" href="{uri}/api/task/t-1" type="application/vnd.vmware.vcloud.task+xml">
  <Owner type="application/vnd.vmware.admin.edgeGateway+xml" name="gw-1" href="{uri}{GATEWAY_PATH}"/>
</Task>"#,
        uri = server.uri()
    )
}

async fn mount_gateway(server: &MockServer, body: String) {
    Mock::given(method("GET"))
        .and(path(GATEWAY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

async fn mount_task(server: &MockServer, verb: &str, at: &str) {
    Mock::given(method(verb))
        .and(path(at))
        .respond_with(ResponseTemplate::new(202).set_body_string(task_xml(server, "running")))
        .expect(1)
        .mount(server)
        .await;
}

async fn setup() -> (MockServer, EdgeGateway) {
    let server = MockServer::start().await;
    let gateway = handle(&server);
    (server, gateway)
}

fn handle(server: &MockServer) -> EdgeGateway {
    let client = VcaClient::with_client(reqwest::Client::new());
    EdgeGateway::new(
        client,
        vcair_api::types::EdgeGateway::at(format!("{}{GATEWAY_PATH}", server.uri())),
    )
}

/// The one request received on `at`.
async fn submitted(server: &MockServer, at: &str) -> Request {
    let requests = server.received_requests().await.unwrap();
    let mut matching: Vec<_> = requests
        .into_iter()
        .filter(|r| r.url.path() == at)
        .collect();
    assert_eq!(matching.len(), 1, "expected exactly one request to {at}");
    matching.remove(0)
}

fn submitted_services(request: &Request) -> ServiceConfiguration {
    xml::decode(std::str::from_utf8(&request.body).unwrap()).unwrap()
}

fn nat_rules(services: &ServiceConfiguration) -> Vec<NatRule> {
    services.nat_rules().to_vec()
}

fn firewall_rules(services: &ServiceConfiguration) -> Vec<FirewallRule> {
    services.firewall_rules().to_vec()
}

// ── Refresh ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_refresh_replaces_snapshot() {
    let (server, mut gateway) = setup().await;
    mount_gateway(&server, default_gateway_xml(&server)).await;

    gateway.refresh().await.unwrap();

    assert_eq!(gateway.document().name, "gw-1");
    assert_eq!(gateway.interfaces().len(), 2);
    assert_eq!(gateway.uplink().unwrap().href, uplink_href(&server));
    assert_eq!(gateway.nat_rules().len(), 1);
    assert_eq!(gateway.firewall_rules().len(), 1);

    // A second refresh must not accumulate list elements.
    gateway.refresh().await.unwrap();
    assert_eq!(gateway.nat_rules().len(), 1);
    assert_eq!(gateway.interfaces().len(), 2);
}

#[tokio::test]
async fn test_refresh_failure_is_wrapped() {
    let (server, mut gateway) = setup().await;

    Mock::given(method("GET"))
        .and(path(GATEWAY_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = gateway.refresh().await.unwrap_err();
    assert!(
        matches!(&err, Error::Refresh { source } if matches!(**source, Error::Api { status: 503, .. })),
        "expected Refresh(Api 503), got: {err:?}"
    );
    assert!(err.is_transient());
}

// ── 1:1 mappings ────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_mapping_appends_nat_pair_and_inbound_rule() {
    let (server, mut gateway) = setup().await;
    mount_gateway(&server, default_gateway_xml(&server)).await;

    Mock::given(method("POST"))
        .and(path(CONFIGURE_PATH))
        .and(header(
            "content-type",
            "application/vnd.vmware.admin.edgeGatewayServiceConfiguration+xml",
        ))
        .respond_with(ResponseTemplate::new(202).set_body_string(task_xml(&server, "running")))
        .expect(1)
        .mount(&server)
        .await;

    let task = gateway
        .create_1to1_mapping("10.0.0.5", "203.0.113.9", "web server", true, false)
        .await
        .unwrap();
    assert_eq!(task.status(), TaskStatus::Running);
    assert!(!task.is_terminal());

    let request = submitted(&server, CONFIGURE_PATH).await;
    let body = std::str::from_utf8(&request.body).unwrap();
    assert!(body.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n  <EdgeGatewayServiceConfiguration"));

    let services = submitted_services(&request);
    let uplink = uplink_href(&server);

    let nat = nat_rules(&services);
    assert_eq!(nat.len(), 3);
    assert_eq!(nat[0].description, "ssh forward");

    let snat = &nat[1];
    assert_eq!(snat.rule_type, "SNAT");
    assert_eq!(snat.description, "web server");
    assert!(snat.is_enabled);
    let g = snat.gateway_nat_rule.as_ref().unwrap();
    assert_eq!(g.original_ip, "10.0.0.5");
    assert_eq!(g.translated_ip, "203.0.113.9");
    assert_eq!(g.interface_href(), uplink);

    let dnat = &nat[2];
    assert_eq!(dnat.rule_type, "DNAT");
    let g = dnat.gateway_nat_rule.as_ref().unwrap();
    assert_eq!(g.original_ip, "203.0.113.9");
    assert_eq!(g.translated_ip, "10.0.0.5");
    assert_eq!(g.original_port, "any");
    assert_eq!(g.translated_port, "any");
    assert_eq!(g.protocol, "any");
    assert_eq!(g.interface_href(), uplink);

    let fw = firewall_rules(&services);
    assert_eq!(fw.len(), 2);
    assert_eq!(fw[0].description, "ssh in");
    let inbound = &fw[1];
    assert_eq!(inbound.policy, "allow");
    assert!(inbound.matches_any_protocol());
    assert_eq!(inbound.source_ip, "Any");
    assert_eq!(inbound.destination_ip, "203.0.113.9");
    assert_eq!(inbound.destination_port_range, "Any");
    assert_eq!(inbound.source_port_range, "Any");
}

#[tokio::test]
async fn test_remove_mapping_keeps_user_rules() {
    let server = MockServer::start().await;
    let uplink = uplink_href(&server);

    // The gateway already carries the mapping's four rules around the
    // user's own rules.
    let nat = format!(
        r#"{forward}
        <NatRule>
          <RuleType>SNAT</RuleType>
          <IsEnabled>true</IsEnabled>
          <GatewayNatRule>
            <Interface href="{uplink}"/>
            <OriginalIp>10.0.0.5</OriginalIp>
            <TranslatedIp>203.0.113.9</TranslatedIp>
          </GatewayNatRule>
        </NatRule>
        <NatRule>
          <RuleType>DNAT</RuleType>
          <IsEnabled>true</IsEnabled>
          <GatewayNatRule>
            <Interface href="{uplink}"/>
            <OriginalIp>203.0.113.9</OriginalIp>
            <OriginalPort>any</OriginalPort>
            <TranslatedIp>10.0.0.5</TranslatedIp>
            <TranslatedPort>any</TranslatedPort>
            <Protocol>any</Protocol>
          </GatewayNatRule>
        </NatRule>"#,
        forward = port_forward(&uplink),
    );
    let fw = format!(
        r"
        <FirewallRule>
          <IsEnabled>true</IsEnabled>
          <Policy>allow</Policy>
          <Protocols><Any>true</Any></Protocols>
          <DestinationPortRange>Any</DestinationPortRange>
          <DestinationIp>203.0.113.9</DestinationIp>
          <SourcePortRange>Any</SourcePortRange>
          <SourceIp>Any</SourceIp>
        </FirewallRule>{USER_FIREWALL_RULE}
        <FirewallRule>
          <IsEnabled>true</IsEnabled>
          <Policy>allow</Policy>
          <Protocols><Any>true</Any></Protocols>
          <DestinationPortRange>Any</DestinationPortRange>
          <DestinationIp>Any</DestinationIp>
          <SourcePortRange>Any</SourcePortRange>
          <SourceIp>10.0.0.5</SourceIp>
        </FirewallRule>"
    );
    mount_gateway(
        &server,
        gateway_xml(&server, &interface("internet", "uplink", &uplink), &nat, &fw),
    )
    .await;
    mount_task(&server, "POST", CONFIGURE_PATH).await;

    let mut gateway = handle(&server);
    gateway
        .remove_1to1_mapping("10.0.0.5", "203.0.113.9")
        .await
        .unwrap();

    let services = submitted_services(&submitted(&server, CONFIGURE_PATH).await);
    assert!(services.nat_service.as_ref().unwrap().is_enabled);

    let nat = nat_rules(&services);
    assert_eq!(nat.len(), 1);
    assert_eq!(nat[0].description, "ssh forward");

    let fw = firewall_rules(&services);
    assert_eq!(fw.len(), 1);
    assert_eq!(fw[0].description, "ssh in");
}

#[tokio::test]
async fn test_preserved_rules_keep_multiline_descriptions() {
    let server = MockServer::start().await;
    let uplink = uplink_href(&server);
    let fw_rule = USER_FIREWALL_RULE.replace(
        "<Description>ssh in</Description>",
        "<Description>ssh in&#xD;&#xA;from office</Description>",
    );
    mount_gateway(
        &server,
        gateway_xml(
            &server,
            &interface("internet", "uplink", &uplink),
            &port_forward(&uplink),
            &fw_rule,
        ),
    )
    .await;
    mount_task(&server, "POST", CONFIGURE_PATH).await;

    let mut gateway = handle(&server);
    gateway
        .remove_1to1_mapping("10.0.0.5", "203.0.113.9")
        .await
        .unwrap();

    let request = submitted(&server, CONFIGURE_PATH).await;
    let body = std::str::from_utf8(&request.body).unwrap();
    assert!(body.contains("<Description>ssh in&#xD;&#xA;from office</Description>"));

    let fw = firewall_rules(&submitted_services(&request));
    assert_eq!(fw.len(), 1);
    assert_eq!(fw[0].description, "ssh in\r\nfrom office");
}

#[tokio::test]
async fn test_remove_ignores_rules_on_other_interfaces() {
    let server = MockServer::start().await;
    let uplink = uplink_href(&server);
    let nat = r#"
        <NatRule>
          <RuleType>SNAT</RuleType>
          <IsEnabled>true</IsEnabled>
          <GatewayNatRule>
            <Interface href="https://elsewhere/network/int-1"/>
            <OriginalIp>10.0.0.5</OriginalIp>
            <TranslatedIp>203.0.113.9</TranslatedIp>
          </GatewayNatRule>
        </NatRule>"#;
    mount_gateway(
        &server,
        gateway_xml(&server, &interface("internet", "uplink", &uplink), nat, ""),
    )
    .await;
    mount_task(&server, "POST", CONFIGURE_PATH).await;

    let mut gateway = handle(&server);
    gateway
        .remove_1to1_mapping("10.0.0.5", "203.0.113.9")
        .await
        .unwrap();

    let services = submitted_services(&submitted(&server, CONFIGURE_PATH).await);
    assert_eq!(nat_rules(&services).len(), 1);
}

#[tokio::test]
async fn test_mapping_requires_uplink() {
    let (server, mut gateway) = setup().await;
    mount_gateway(
        &server,
        gateway_xml(
            &server,
            &interface("default-routed", "internal", "https://elsewhere/network/int-1"),
            "",
            "",
        ),
    )
    .await;

    Mock::given(method("POST"))
        .and(path(CONFIGURE_PATH))
        .respond_with(ResponseTemplate::new(202))
        .expect(0)
        .mount(&server)
        .await;

    let err = gateway
        .create_1to1_mapping("10.0.0.5", "203.0.113.9", "web", true, true)
        .await
        .unwrap_err();
    assert!(err.is_not_found(), "expected NotFound, got: {err:?}");
}

#[tokio::test]
async fn test_refresh_failure_aborts_before_submission() {
    let (server, mut gateway) = setup().await;

    Mock::given(method("GET"))
        .and(path(GATEWAY_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(CONFIGURE_PATH))
        .respond_with(ResponseTemplate::new(202))
        .expect(0)
        .mount(&server)
        .await;

    let result = gateway.remove_1to1_mapping("10.0.0.5", "203.0.113.9").await;
    assert!(
        matches!(result, Err(Error::Refresh { .. })),
        "expected Refresh error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_empty_address_is_rejected_without_requests() {
    let (server, mut gateway) = setup().await;

    let result = gateway.create_1to1_mapping("", "203.0.113.9", "", true, true).await;
    assert!(matches!(result, Err(Error::InvalidArgument { .. })));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_api_rejection_is_reported_as_submission_error() {
    let (server, mut gateway) = setup().await;
    mount_gateway(&server, default_gateway_xml(&server)).await;

    Mock::given(method("POST"))
        .and(path(CONFIGURE_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_string(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<Error xmlns="http://www.vmware.com/vcloud/v1.5" majorErrorCode="400" message="Invalid NAT rule." minorErrorCode="BAD_REQUEST"/>"#,
        ))
        .mount(&server)
        .await;

    let err = gateway
        .create_1to1_mapping("10.0.0.5", "203.0.113.9", "web", false, false)
        .await
        .unwrap_err();

    match &err {
        Error::Submission { operation, source } => {
            assert_eq!(*operation, "configureServices");
            assert!(matches!(
                **source,
                Error::Api { status: 400, ref message, .. } if message == "Invalid NAT rule."
            ));
        }
        other => panic!("expected Submission error, got: {other:?}"),
    }
    assert_eq!(err.api_error_code(), Some("BAD_REQUEST"));
}

#[tokio::test]
async fn test_unreadable_task_is_a_decode_error() {
    let (server, mut gateway) = setup().await;
    mount_gateway(&server, default_gateway_xml(&server)).await;

    Mock::given(method("POST"))
        .and(path(CONFIGURE_PATH))
        .respond_with(ResponseTemplate::new(202).set_body_string("<Task status="))
        .mount(&server)
        .await;

    let result = gateway
        .create_1to1_mapping("10.0.0.5", "203.0.113.9", "web", false, false)
        .await;
    assert!(
        matches!(result, Err(Error::TaskDecode { .. })),
        "expected TaskDecode error, got: {result:?}"
    );
}

// ── Bulk replacement ────────────────────────────────────────────────

#[tokio::test]
async fn test_update_firewall_sends_document_verbatim() {
    let (server, mut gateway) = setup().await;
    mount_gateway(&server, default_gateway_xml(&server)).await;
    mount_task(&server, "POST", CONFIGURE_PATH).await;

    gateway.refresh().await.unwrap();
    let mut services = gateway.service_configuration().cloned().unwrap();
    services
        .firewall_service
        .as_mut()
        .unwrap()
        .firewall_rules
        .clear();

    gateway.update_firewall(&services).await.unwrap();

    let sent = submitted_services(&submitted(&server, CONFIGURE_PATH).await);
    assert!(firewall_rules(&sent).is_empty());
    assert_eq!(nat_rules(&sent), nat_rules(&services));
}

// ── Public IPs ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_request_public_ip_puts_allocation() {
    let (server, mut gateway) = setup().await;
    mount_gateway(&server, default_gateway_xml(&server)).await;

    Mock::given(method("PUT"))
        .and(path(MANAGE_IPS_PATH))
        .and(header("accept", "application/xml;version=5.7"))
        .and(header(
            "content-type",
            "application/vnd.vmware.vchs.edgeGatewayIpAllocation.list+xml",
        ))
        .respond_with(ResponseTemplate::new(202).set_body_string(task_xml(&server, "queued")))
        .expect(1)
        .mount(&server)
        .await;

    let task = gateway.request_public_ip("internet", "2").await.unwrap();
    assert_eq!(task.status(), TaskStatus::Queued);

    let request = submitted(&server, MANAGE_IPS_PATH).await;
    let doc: ExternalIpAddressActionList =
        xml::decode(std::str::from_utf8(&request.body).unwrap()).unwrap();
    let allocation = doc.allocation.unwrap();
    assert_eq!(allocation.external_network_name, "internet");
    assert_eq!(allocation.external_network_ref, uplink_href(&server));
    assert_eq!(allocation.count, "2");
    assert!(doc.deallocation.is_none());
}

#[tokio::test]
async fn test_remove_public_ip_puts_deallocation() {
    let (server, mut gateway) = setup().await;
    mount_gateway(&server, default_gateway_xml(&server)).await;
    mount_task(&server, "PUT", MANAGE_IPS_PATH).await;

    gateway
        .remove_public_ip("internet", "203.0.113.20")
        .await
        .unwrap();

    let request = submitted(&server, MANAGE_IPS_PATH).await;
    let doc: ExternalIpAddressActionList =
        xml::decode(std::str::from_utf8(&request.body).unwrap()).unwrap();
    let deallocation = doc.deallocation.unwrap();
    assert_eq!(deallocation.external_network_name, "internet");
    assert_eq!(deallocation.external_ip_address, "203.0.113.20");
    assert!(doc.allocation.is_none());
}

#[tokio::test]
async fn test_public_ip_unknown_network() {
    let (server, mut gateway) = setup().await;
    mount_gateway(&server, default_gateway_xml(&server)).await;

    Mock::given(method("PUT"))
        .and(path(MANAGE_IPS_PATH))
        .respond_with(ResponseTemplate::new(202))
        .expect(0)
        .mount(&server)
        .await;

    let err = gateway.request_public_ip("nope", "1").await.unwrap_err();
    assert!(
        matches!(&err, Error::NotFound { name, .. } if name == "nope"),
        "expected NotFound, got: {err:?}"
    );
}

// ── Tasks ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_task_refresh_reads_new_status() {
    let (server, mut gateway) = setup().await;
    mount_gateway(&server, default_gateway_xml(&server)).await;
    mount_task(&server, "PUT", MANAGE_IPS_PATH).await;

    Mock::given(method("GET"))
        .and(path("/api/task/t-1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(task_xml(&server, "success")))
        .mount(&server)
        .await;

    let mut task = gateway.request_public_ip("internet", "1").await.unwrap();
    assert_eq!(task.status(), TaskStatus::Running);

    task.refresh().await.unwrap();
    assert_eq!(task.status(), TaskStatus::Success);
    assert!(task.is_terminal());
}
