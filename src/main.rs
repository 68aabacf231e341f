use clap::Parser;
use envman::application::{Session, Targets};
use envman::cli::{output, repl, Cli};
use envman::error::EnvmanError;
use envman::infrastructure::backup;
use envman::infrastructure::block;
use envman::infrastructure::{Config, ShellFamily};

fn main() {
    let cli = Cli::parse();

    let result = run(cli);

    match result {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}

fn run(cli: Cli) -> Result<(), EnvmanError> {
    // Unsupported shells abort before any file is touched
    let family = ShellFamily::detect()?;
    let config = Config::load(cli.config.as_deref())?;
    let targets = Targets::resolve(
        family,
        &config,
        cli.shell_file,
        cli.hosts_file,
        cli.notes_file,
    );

    output::print_banner(family);

    match backup::backup_once(&targets.exports.path) {
        Ok(Some(backup_path)) => output::print_backup_created(&targets.exports.alias, &backup_path),
        Ok(None) => {}
        Err(e) => output::print_backup_failed(&e),
    }

    if !block::is_writable(&targets.hosts.path) {
        output::print_sudo_warning(&targets.hosts.alias);
    }

    println!();
    output::print_initializing(&targets.exports);
    output::print_initializing(&targets.hosts);
    output::print_initializing(&targets.notes);

    // Any target failing to synchronize is fatal for the whole session
    let session = Session::initialize(targets)?;

    output::print_command_reference();

    repl::run(session, family)
}
