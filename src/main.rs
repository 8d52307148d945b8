use ast::Command;

use anyhow::{anyhow, Result};

use bt_uuid::UuidValue;
use log::{info, warn};

use btleplug::api::Manager as _;
use btleplug::platform::Manager;
use dialoguer::{theme::ColorfulTheme, Completion, Input};

use lalrpop_util::lalrpop_mod;

lalrpop_mod!(
    #[cfg_attr(feature = "cargo-clippy", allow(clippy::all))]
    pub cli
);
mod ast;
mod ble;

use ble::{describe, Scanner};

struct Commands {
    commands: Vec<String>,
}
impl Default for Commands {
    fn default() -> Self {
        Self {
            commands: Command::all_strings(),
        }
    }
}

impl Completion for Commands {
    fn get(&self, input: &str) -> Option<String> {
        let matches = self
            .commands
            .iter()
            .filter(|option| option.starts_with(input))
            .collect::<Vec<_>>();

        if matches.len() == 1 {
            Some(matches[0].to_string())
        } else {
            None
        }
    }
}

fn help() {
    println!("Available commands: {}", Command::all_strings().join(", "));
    println!("Some specific syntaxes: ");
    println!("   parse <uuid>              (180D, 0000180D or 0000180D-0000-1000-8000-00805F9B34FB)");
    println!("   expand <uuid> ");
    println!("   eq <uuid> <uuid> ");
    println!("   contains <uuid> <byte> <byte> ");
    println!("   scan [number_of_seconds] ");
    println!("   find <uuid> ");
}

/// The execution shell, to be stateful
struct Shell {
    scanner: Option<Scanner>,
}

impl Shell {
    fn new(scanner: Option<Scanner>) -> Self {
        Self { scanner }
    }

    fn scanner(&self) -> Result<&Scanner> {
        self.scanner
            .as_ref()
            .ok_or_else(|| anyhow!("No BLE adapter available"))
    }

    fn parse(&self, text: &str) -> Result<()> {
        let uuid = UuidValue::from_text(text)?;

        println!("Width:    {:?}", uuid.width());
        println!("Value:    {}", uuid);
        println!("Expanded: {}", uuid.as_128bit());
        if let Some(short) = uuid.try_to_u16() {
            println!("Short:    {}", UuidValue::from_uint16(short));
        }
        Ok(())
    }

    fn expand(&self, text: &str) -> Result<()> {
        println!("{}", UuidValue::from_text(text)?.as_128bit());
        Ok(())
    }

    fn equals(&self, a: &str, b: &str) -> Result<()> {
        let a = UuidValue::from_text(a)?;
        let b = UuidValue::from_text(b)?;

        println!("{} == {}: {}", a, b, a == b);
        Ok(())
    }

    fn contains(&self, text: &str, first: u8, second: u8) -> Result<()> {
        let uuid = UuidValue::from_text(text)?;

        println!(
            "{} contains {:02X} {:02X}: {}",
            uuid,
            first,
            second,
            uuid.contains(first, second)
        );
        Ok(())
    }

    async fn list(&self) -> Result<()> {
        let peripherals = self.scanner()?.discovered().await?;

        println!("Found {} peripherals", peripherals.len());
        for (idx, peripheral) in peripherals.iter().enumerate() {
            println!(
                "{} Peripheral {} ({}):",
                idx,
                peripheral.id,
                peripheral.local_name.as_deref().unwrap_or("unnamed")
            );
            for service in &peripheral.services {
                println!("    {}", describe(service));
            }
        }
        Ok(())
    }

    async fn find(&self, text: &str) -> Result<()> {
        let uuid = UuidValue::from_text(text)?;
        let peripherals = self.scanner()?.discovered().await?;

        let matching = peripherals
            .iter()
            .filter(|peripheral| peripheral.advertises(&uuid))
            .collect::<Vec<_>>();

        println!("{} peripherals advertise {}", matching.len(), describe(&uuid));
        for peripheral in matching {
            println!(
                "    {} ({})",
                peripheral.id,
                peripheral.local_name.as_deref().unwrap_or("unnamed")
            );
        }
        Ok(())
    }

    async fn scan(&self, duration: std::time::Duration) -> Result<()> {
        println!("Starting scan ... ");
        self.scanner()?.scan(duration).await?;
        println!("Scan done");
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    pretty_env_logger::init();

    let manager = Manager::new().await?;
    let adapter = manager.adapters().await?.into_iter().next();

    if adapter.is_none() {
        warn!("NO BLE adapters found! Only identifier commands are available.");
    }

    let shell = Shell::new(adapter.map(Scanner::new));

    loop {
        let completion = Commands::default();
        let command = Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt("Input (quit with 'exit') ")
            .completion_with(&completion)
            .interact_text()?;

        info!("User input: {:?}", command);
        let command = cli::CommandParser::new().parse(&command);
        info!("Parsed: {:?}", command);

        let result = match command {
            Ok(Command::Parse(text)) => shell.parse(&text),
            Ok(Command::Expand(text)) => shell.expand(&text),
            Ok(Command::Equals(a, b)) => shell.equals(&a, &b),
            Ok(Command::Contains(text, first, second)) => shell.contains(&text, first, second),
            Ok(Command::Scan(duration)) => shell.scan(duration).await,
            Ok(Command::List) => shell.list().await,
            Ok(Command::Find(text)) => shell.find(&text).await,
            Ok(Command::Help) => {
                help();
                Ok(())
            }
            Ok(Command::Exit) => break,
            Err(e) => Err(anyhow!("Command parse failed: {:?}", e)),
        };

        if let Err(err) = result {
            println!("ERR: {:?}", err);
            println!();
            help();
        }
    }

    Ok(())
}
