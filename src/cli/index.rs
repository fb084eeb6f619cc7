use clap::Subcommand;

mod list;
mod show;

#[derive(Subcommand)]
pub enum IndexCommand {
    #[command(about = "List indices, optionally of one market")]
    #[clap(visible_aliases = &["ls"])]
    List(Box<list::IndexListCommand>),

    #[command(about = "Show the description of an index")]
    Show(Box<show::IndexShowCommand>),
}

impl IndexCommand {
    pub async fn exec(&self) {
        match self {
            IndexCommand::List(cmd) => {
                cmd.exec().await;
            }
            IndexCommand::Show(cmd) => {
                cmd.exec().await;
            }
        }
    }
}
