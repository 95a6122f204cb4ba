//! Task command handlers.

use vcair_api::Task;
use vcair_api::types::TaskDocument;

use crate::cli::{GlobalOpts, TaskArgs, TaskCommand};
use crate::error::CliError;

use super::Session;
use super::util;

pub async fn handle(session: &Session, args: TaskArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        TaskCommand::Show { href } => {
            let mut task = Task::new(
                session.client().clone(),
                TaskDocument {
                    href,
                    ..TaskDocument::default()
                },
            );
            task.refresh().await?;
            util::print_task(&task, global)
        }
    }
}
