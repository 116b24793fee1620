// tunnel-commands - keeps your service tunnel commands between sessions
//
// This is the main entry point. Parses CLI args and dispatches to handlers.

use anyhow::Context;
use std::env;
use std::sync::Arc;
use tunnel_commands_lib::{
    catalog::{CommandTerminal, ServiceCommand, ServiceInfo, StandardCommands},
    config::StoreConfig,
    logging,
    prefs::SqlitePreferences,
    terminal::TerminalDetector,
    CommandStore, Database, StoreError,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_logging()
        .map_err(anyhow::Error::msg)
        .context("starting tunnel-commands")?;

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return Ok(());
    }

    let command = &args[1];

    let result = match command.as_str() {
        "list" => handle_list().await,
        "show" => handle_show(&args[2..]).await,
        "add" => handle_add(&args[2..]).await,
        "remove" => handle_remove(&args[2..]).await,
        "terminal" => handle_terminal(&args[2..]).await,
        "reset" => handle_reset().await,
        "export" => handle_export().await,
        "status" => handle_status().await,
        "version" | "-v" | "--version" => {
            println!("tunnel-commands v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "help" | "-h" | "--help" => {
            print_usage();
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("✗ {}", e.user_message());
        std::process::exit(1);
    }

    Ok(())
}

async fn handle_list() -> Result<(), StoreError> {
    let (store, _) = open_store().await?;
    let view = store.view().await?;

    let catalog = match view.catalog() {
        Some(catalog) => catalog,
        None => {
            println!("No tunnel commands.");
            return Ok(());
        }
    };

    println!("\nTunnel commands:");
    println!("{}", "=".repeat(60));
    for service in &catalog.services {
        println!(
            "{:<14} {} command(s)",
            service.service_info.label(),
            service.commands.len()
        );
        for command in &service.commands {
            println!("    - {}", command.name);
        }
    }
    println!("{}", "=".repeat(60));

    match view.default_terminal() {
        Some(terminal) => println!("Terminal: {}", terminal.command_line()),
        None => println!("Terminal: (not set)"),
    }

    Ok(())
}

async fn handle_show(args: &[String]) -> Result<(), StoreError> {
    let vendor = match args.first() {
        Some(vendor) => vendor,
        None => {
            eprintln!("Error: No vendor given");
            return Ok(());
        }
    };

    let (store, _) = open_store().await?;
    let view = store.view().await?;
    let commands = view.commands_for_vendor(vendor);

    if commands.is_empty() {
        println!("No commands for '{}'", vendor);
        return Ok(());
    }

    println!("\nCommands for {}:", vendor);
    println!("{}", "=".repeat(60));
    for (i, command) in commands.iter().enumerate() {
        println!("{:3}. {}", i + 1, command.name);
        println!("     {}", command.command_line);
        if let Some(options) = &command.options {
            println!("     options: {}", options);
        }
    }
    println!("{}", "=".repeat(60));

    Ok(())
}

async fn handle_add(args: &[String]) -> Result<(), StoreError> {
    let mut positional = Vec::new();
    let mut options: Option<String> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--options" => {
                i += 1;
                if i < args.len() {
                    options = Some(args[i].clone());
                }
            }
            arg => positional.push(arg.to_string()),
        }
        i += 1;
    }

    if positional.len() < 3 {
        eprintln!("Usage: tunnel-commands add <vendor> <name> <command-line> [--options <options>]");
        return Ok(());
    }

    let vendor = &positional[0];
    let name = positional[1].trim();
    let command_line = positional[2..].join(" ");

    if name.is_empty() {
        return Err(StoreError::InvalidCommand("name is empty".to_string()));
    }
    if command_line.trim().is_empty() {
        return Err(StoreError::InvalidCommand("command line is empty".to_string()));
    }

    let mut command = ServiceCommand::new(name, command_line.trim());
    if let Some(options) = options {
        command = command.with_options(&options);
    }

    let (store, _) = open_store().await?;
    let mut view = store.view().await?;
    let added = match view.catalog_mut() {
        Some(catalog) => catalog.add_commands(ServiceInfo::new(vendor), &[command]),
        None => 0,
    };

    if added == 0 {
        eprintln!("'{}' already exists for {}", name, vendor);
        return Ok(());
    }

    store.save(view).await?;
    println!("✓ Added '{}' to {}", name, vendor);

    Ok(())
}

async fn handle_remove(args: &[String]) -> Result<(), StoreError> {
    if args.len() < 2 {
        eprintln!("Usage: tunnel-commands remove <vendor> <name>");
        return Ok(());
    }

    let vendor = &args[0];
    let name = &args[1];

    let (store, _) = open_store().await?;
    let mut view = store.view().await?;

    let catalog = view
        .catalog_mut()
        .ok_or_else(|| StoreError::ServiceNotFound(vendor.clone()))?;
    if catalog.service(vendor).is_none() {
        return Err(StoreError::ServiceNotFound(vendor.clone()));
    }

    match catalog.remove_command(vendor, name) {
        Some(_) => {
            store.save(view).await?;
            println!("✓ Removed '{}' from {}", name, vendor);
        }
        None => println!("No command '{}' for {}", name, vendor),
    }

    Ok(())
}

async fn handle_terminal(args: &[String]) -> Result<(), StoreError> {
    let (store, _) = open_store().await?;
    let mut view = store.view().await?;

    if args.is_empty() {
        match view.default_terminal() {
            Some(terminal) => println!("{}", terminal.command_line()),
            None => println!("(not set)"),
        }
        return Ok(());
    }

    let platform_id = TerminalDetector::detect()
        .map(|t| t.platform_id)
        .unwrap_or_default();
    let arg_refs: Vec<&str> = args[1..].iter().map(String::as_str).collect();
    let terminal = CommandTerminal::new(&platform_id, &args[0], &arg_refs);

    if let Some(catalog) = view.catalog_mut() {
        catalog.default_terminal = Some(terminal.clone());
    }
    store.save(view).await?;

    println!("✓ Default terminal: {}", terminal.command_line());
    Ok(())
}

async fn handle_reset() -> Result<(), StoreError> {
    let (store, _) = open_store().await?;
    store.reset().await?;
    println!("✓ Tunnel commands reset to defaults");
    Ok(())
}

async fn handle_export() -> Result<(), StoreError> {
    let (store, _) = open_store().await?;
    let view = store.view().await?;

    if let Some(catalog) = view.catalog() {
        let json = serde_json::to_string_pretty(catalog).map_err(StoreError::serialize)?;
        println!("{}", json);
    }

    Ok(())
}

async fn handle_status() -> Result<(), StoreError> {
    let (store, db) = open_store().await?;
    let view = store.view().await?;
    let stats = db.stats().await?;

    println!("\ntunnel-commands Status");
    println!("{}", "=".repeat(60));
    println!("  Database:    {}", db.path().display());
    println!("  Preferences: {}", stats.total_preferences);
    if let Some(catalog) = view.catalog() {
        let total: usize = catalog.services.iter().map(|s| s.commands.len()).sum();
        println!("  Services:    {}", catalog.vendor_ids().join(", "));
        println!("  Commands:    {}", total);
    }
    println!(
        "  Predefined:  {}",
        if view.has_predefined() { "on" } else { "off" }
    );
    println!("{}", "=".repeat(60));

    db.close().await;
    Ok(())
}

async fn open_store() -> Result<(CommandStore, Database), StoreError> {
    let config = StoreConfig::from_env()?;
    let db = Database::new(config.db_path()).await?;
    let prefs = SqlitePreferences::new(db.clone());

    let store = CommandStore::new(Arc::new(prefs)).with_predefined(Arc::new(StandardCommands));
    Ok((store, db))
}

fn print_usage() {
    println!(
        r#"tunnel-commands v{} - Commands for your service tunnels

USAGE:
    tunnel-commands <COMMAND> [OPTIONS]

COMMANDS:
    list                                  List services and their commands
    show <vendor>                         Show commands for a service
    add <vendor> <name> <command-line>    Add a command [--options <options>]
    remove <vendor> <name>                Remove a command
    terminal [<path> [args...]]           Show or set the default terminal
    reset                                 Restore the default commands
    export                                Print the stored catalog as JSON
    status                                Show where things are stored
    version                               Show version
    help                                  Show this help

EXAMPLES:
    tunnel-commands list
    tunnel-commands show mysql
    tunnel-commands add postgresql "pg_dump" pg_dump --options "-h ${{host}} -p ${{port}}"
    tunnel-commands terminal /usr/bin/gnome-terminal --

ENVIRONMENT:
    TUNNEL_COMMANDS_HOME    Data directory (default: ~/.tunnel-commands)
    RUST_LOG                Log level (default: info)
"#,
        env!("CARGO_PKG_VERSION")
    );
}
