// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use clap::{Parser, Subcommand};
use inhibit::commands::list::ListCommand;
use inhibit::commands::lock::LockCommand;
use inhibit::commands::status::StatusCommand;
use inhibit::commands::unlock::UnlockCommand;
use inhibit::commands::wait::WaitCommand;
use inhibit::config::InhibitConfig;
use inhibit::error::{
    InhibitError, Result, format_error_chain, format_error_with_color, get_exit_code,
};
use inhibit::logging;
use std::io::IsTerminal;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "inhibit")]
#[command(author, version, about = "Persistent run inhibition hints for packages", long_about = None)]
struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (defaults to $INHIBIT_CONFIG or /etc/inhibit/config.toml)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Resolve the inhibit directory beneath this root directory
    #[arg(long, value_name = "DIR", global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inhibit a resource with a hint
    Lock {
        /// Resource (package) name
        resource: String,

        /// Reason for the inhibition
        #[arg(long, default_value = "refresh")]
        hint: String,
    },

    /// Clear the inhibition of a resource
    Unlock {
        /// Resource (package) name
        resource: String,
    },

    /// Show the inhibition hint of a resource
    Status {
        /// Resource (package) name
        resource: String,

        /// Print only the hint (nothing when not inhibited)
        #[arg(short = 'q', long)]
        quiet: bool,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// List inhibited resources
    #[command(visible_alias = "ls")]
    List {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Block until a resource is no longer inhibited
    Wait {
        /// Resource (package) name
        resource: String,

        /// Give up after this many seconds (waits indefinitely when omitted)
        #[arg(long, value_name = "SECONDS")]
        timeout: Option<u64>,
    },
}

fn load_config(cli: &Cli) -> Result<InhibitConfig> {
    let config = InhibitConfig::load(cli.config.as_deref())?;
    Ok(match &cli.root {
        Some(root) => config.with_root_dir(root.clone()),
        None => config,
    })
}

fn report_error(error: &InhibitError) -> ! {
    let stderr = std::io::stderr();
    if stderr.is_terminal() {
        eprint!("{}", format_error_with_color(error, true));
    } else {
        eprintln!("{}", format_error_chain(error));
    }
    std::process::exit(get_exit_code(error));
}

fn main() {
    let cli = Cli::parse();

    logging::setup_logger(cli.verbose);

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => report_error(&e),
    };
    let store = config.store();

    let result: Result<()> = (|| match &cli.command {
        Commands::Lock { resource, hint } => {
            let command = LockCommand::new(&store)?;
            command.execute(resource, hint)
        }
        Commands::Unlock { resource } => {
            let command = UnlockCommand::new(&store)?;
            command.execute(resource)
        }
        Commands::Status {
            resource,
            quiet,
            json,
        } => {
            let command = StatusCommand::new(&store)?;
            command.execute(resource, *quiet, *json)
        }
        Commands::List { json } => {
            let command = ListCommand::new(&store)?;
            command.execute(*json)
        }
        Commands::Wait { resource, timeout } => {
            let command = WaitCommand::new(&store)?;
            command.execute(resource, *timeout)
        }
    })();

    if let Err(e) = result {
        report_error(&e);
    }
}
