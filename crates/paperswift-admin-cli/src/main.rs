//! PaperSwift Admin CLI
//!
//! Terminal console for the academic records service: log in once, then
//! list, inspect, create, update and delete exams, courses, teachers,
//! departments, degrees and schemes.
//!
//! ## Usage
//!
//! ```bash
//! paperswift-admin login --username admin --email admin@example.edu
//! paperswift-admin courses list
//! paperswift-admin courses create --set code=CS301 --set name="Data Structures" \
//!     --set sem=3 --set scheme=2019 --set department=CSE
//! paperswift-admin courses update CS301 --set sem=4
//! paperswift-admin courses delete CS301
//! ```

mod commands;
mod output;
mod prompt;

use clap::{Parser, Subcommand};
use paperswift_admin::ResourceKind;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "paperswift-admin")]
#[command(about = "PaperSwift academic records console", long_about = None)]
#[command(version)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	/// Settings file (TOML)
	#[arg(long, global = true, value_name = "FILE")]
	config: Option<PathBuf>,

	/// Verbosity level (can be repeated)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	verbosity: u8,
}

#[derive(Subcommand)]
enum Commands {
	/// Log in and store the session token
	Login {
		#[arg(long)]
		username: String,

		#[arg(long, default_value = "")]
		email: String,

		/// Prompted for without echo when omitted
		#[arg(long)]
		password: Option<String>,
	},

	/// Forget the stored session token
	Logout,

	/// Show the logged-in user
	Whoami,

	/// List the managed resources
	Resources,

	/// Manage exams
	Exams {
		#[command(subcommand)]
		action: ResourceAction,
	},

	/// Manage courses
	Courses {
		#[command(subcommand)]
		action: ResourceAction,
	},

	/// Manage teachers
	Teachers {
		#[command(subcommand)]
		action: ResourceAction,
	},

	/// Manage departments
	Departments {
		#[command(subcommand)]
		action: ResourceAction,
	},

	/// Manage degrees
	Degrees {
		#[command(subcommand)]
		action: ResourceAction,
	},

	/// Manage schemes
	Schemes {
		#[command(subcommand)]
		action: ResourceAction,
	},
}

/// Operations available on every resource
#[derive(Subcommand)]
pub(crate) enum ResourceAction {
	/// List every record
	List,

	/// Show one record
	Show {
		#[arg(value_name = "KEY")]
		key: String,
	},

	/// Create a record
	Create {
		/// Field assignment, e.g. --set sem=3
		#[arg(long = "set", value_name = "FIELD=VALUE")]
		assignments: Vec<String>,
	},

	/// Change fields of a record; only the given fields are sent
	Update {
		#[arg(value_name = "KEY")]
		key: String,

		#[arg(long = "set", value_name = "FIELD=VALUE")]
		assignments: Vec<String>,
	},

	/// Delete a record after confirmation
	Delete {
		#[arg(value_name = "KEY")]
		key: String,

		/// Skip the confirmation prompt
		#[arg(short, long)]
		yes: bool,
	},
}

fn init_tracing(verbosity: u8, default_level: &str) {
	let level = match verbosity {
		0 => default_level,
		1 => "debug",
		_ => "trace",
	};
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.init();
}

#[tokio::main]
async fn main() {
	let cli = Cli::parse();

	let result = match commands::Console::open(cli.config.as_deref()) {
		Ok(console) => {
			init_tracing(cli.verbosity, &console.settings().log_level);
			run(&console, cli.command).await
		}
		Err(e) => Err(e),
	};

	if let Err(e) = result {
		eprintln!("Error: {}", e);
		process::exit(1);
	}
}

async fn run(console: &commands::Console, command: Commands) -> anyhow::Result<()> {
	match command {
		Commands::Login {
			username,
			email,
			password,
		} => console.login(username, email, password).await,
		Commands::Logout => console.logout(),
		Commands::Whoami => console.whoami().await,
		Commands::Resources => {
			console.resources();
			Ok(())
		}
		Commands::Exams { action } => console.resource(ResourceKind::Exams, action).await,
		Commands::Courses { action } => console.resource(ResourceKind::Courses, action).await,
		Commands::Teachers { action } => console.resource(ResourceKind::Teachers, action).await,
		Commands::Departments { action } => {
			console.resource(ResourceKind::Departments, action).await
		}
		Commands::Degrees { action } => console.resource(ResourceKind::Degrees, action).await,
		Commands::Schemes { action } => console.resource(ResourceKind::Schemes, action).await,
	}
}
