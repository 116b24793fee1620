// Builds the catalog a user starts out with.
//
// Used on first run and whenever the stored catalog can't be read. Never
// fails: no terminal and no predefined source just give a smaller catalog.

use crate::catalog::models::{BuiltinService, CommandCatalog};
use crate::catalog::predefined::PredefinedCommandSource;
use crate::terminal::TerminalDetector;
use tracing::debug;

/// Seed a catalog using the running platform's terminal
pub fn seed_catalog(predefined: Option<&dyn PredefinedCommandSource>) -> CommandCatalog {
    let mut catalog = CommandCatalog::new();
    catalog.default_terminal = TerminalDetector::detect();
    fill_services(&mut catalog, predefined);
    catalog
}

/// Add an entry per built-in vendor, then fold in predefined commands
fn fill_services(catalog: &mut CommandCatalog, predefined: Option<&dyn PredefinedCommandSource>) {
    for service in BuiltinService::ALL {
        catalog.ensure_service(service.service_info());
    }

    if let Some(source) = predefined {
        for set in source.command_sets() {
            let vendor = set.service_info.vendor_id.clone();
            let added = catalog.add_commands(set.service_info, &set.commands);
            debug!(%vendor, added, "merged predefined commands");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::predefined::{StandardCommands, StaticCommands};
    use crate::catalog::ServiceCommand;

    #[test]
    fn test_seed_without_predefined() {
        let catalog = seed_catalog(None);

        assert_eq!(catalog.services.len(), BuiltinService::ALL.len());
        assert!(catalog.services.iter().all(|s| s.commands.is_empty()));
        assert_eq!(catalog.default_terminal, TerminalDetector::detect());
    }

    #[test]
    fn test_seed_merges_into_builtin_entries() {
        let standard = StandardCommands::new();
        let catalog = seed_catalog(Some(&standard));

        assert_eq!(catalog.services.len(), BuiltinService::ALL.len());
        assert_eq!(catalog.commands_for_vendor("mysql").unwrap().len(), 1);
        assert!(catalog.commands_for_vendor("rabbitmq").unwrap().is_empty());
    }

    #[test]
    fn test_seed_appends_unknown_vendor() {
        let source = StaticCommands::single("couchdb", vec![ServiceCommand::new("curl", "curl")]);
        let catalog = seed_catalog(Some(&source));

        assert_eq!(catalog.services.len(), BuiltinService::ALL.len() + 1);
        assert_eq!(catalog.services.last().unwrap().vendor_id(), "couchdb");
    }

    #[test]
    fn test_seed_is_deterministic() {
        let standard = StandardCommands::new();
        assert_eq!(seed_catalog(Some(&standard)), seed_catalog(Some(&standard)));
    }
}
