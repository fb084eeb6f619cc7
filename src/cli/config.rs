use clap::Subcommand;
use colored::Colorize;
use finsolve::{api, error::FsResult};
use tabled::settings::{Color, object::Columns};

#[derive(Subcommand)]
pub enum ConfigCommand {
    #[command(about = "Set a configuration entry, e.g. config set http_timeout_secs 10")]
    Set {
        #[arg(help = "Entry key, one of the keys listed by 'config show'")]
        key: String,
        value: String,
    },

    #[command(about = "Show configuration entries, API key env override applied")]
    #[clap(visible_aliases = &["ls"])]
    Show,
}

impl ConfigCommand {
    pub async fn exec(&self) {
        match self.entries() {
            Ok(entries) => {
                let mut table = tabled::builder::Builder::from_iter(&entries).build();
                table.modify(Columns::first(), Color::FG_CYAN);
                println!("{table}");
            }
            Err(err) => {
                println!("[!] {}", err.to_string().red());
            }
        }
    }

    fn entries(&self) -> FsResult<Vec<Vec<String>>> {
        let config = match self {
            ConfigCommand::Set { key, value } => {
                api::set_config(key, value)?;
                api::get_config()?
            }
            ConfigCommand::Show => api::get_config()?,
        };

        let selected = match self {
            ConfigCommand::Set { key, .. } => Some(key.trim().to_lowercase()),
            ConfigCommand::Show => None,
        };

        Ok(config
            .entries()
            .into_iter()
            .filter(|(k, _)| selected.as_deref().is_none_or(|s| s == *k))
            .map(|(k, v)| vec![k.to_string(), v])
            .collect())
    }
}
