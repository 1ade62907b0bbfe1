use clap::Parser;
use emunav::actions::{Services, build_action_table};
use emunav::core::config::{self, CliOverrides};
use emunav::core::menu::load_menu;
use emunav::core::{LineConsole, Navigator, Outcome};
use emunav::emulator::{AuthEmulator, FirestoreEmulator};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "emunav", about = "Menu-driven seeding for the local Firebase emulators")]
struct Args {
    /// Menu definition (JSON)
    #[arg(short, long)]
    menu: Option<PathBuf>,

    /// Firebase project id used by the emulators
    #[arg(short, long)]
    project: Option<String>,

    /// Directory holding users.json and document files
    #[arg(short, long)]
    assets: Option<PathBuf>,
}

fn welcome() {
    println!("************************************");
    println!("*   Firebase Emulator Initializer  *");
    println!("************************************");
    println!();
}

fn main() -> ExitCode {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to emunav.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("emunav.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    welcome();

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error loading settings: {e}");
            return ExitCode::FAILURE;
        }
    };
    let cli = CliOverrides {
        project_id: args.project,
        assets_dir: args.assets,
        menu_file: args.menu,
    };
    let resolved = config::resolve(&file_config, &cli);
    log::info!("emunav starting up: {:?}", resolved);

    let tree = match load_menu(&resolved.menu_file) {
        Ok(tree) => tree,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error loading menu '{}': {e}", resolved.menu_file.display());
            return ExitCode::FAILURE;
        }
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error starting async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    let services = Services {
        documents: Arc::new(FirestoreEmulator::new(&resolved.firestore_host, &resolved.project_id)),
        identities: Arc::new(AuthEmulator::new(&resolved.auth_host, &resolved.project_id)),
        runtime: runtime.handle().clone(),
        assets_dir: resolved.assets_dir.clone(),
        users_file: resolved.users_file.clone(),
    };
    println!("Firestore emulator: {}", resolved.firestore_host);
    println!("Auth emulator:      {}", resolved.auth_host);
    println!();

    let actions = build_action_table(&services);
    for name in actions.missing(&tree.action_names()) {
        log::warn!("Menu references unbound action '{}'", name);
    }

    let mut console = LineConsole::stdio();
    match Navigator::new(&tree, &actions).run(&mut console) {
        Outcome::ExitRequested => log::info!("User exited"),
        Outcome::InputClosed => log::info!("Input closed, shutting down"),
    }
    ExitCode::SUCCESS
}
