/// Predefined (non-persisted) service commands
///
/// A predefined source hands out a fixed baseline of commands per vendor.
/// They are copied into a catalog once, when a fresh catalog is seeded, and
/// are never written back on their own.

use crate::catalog::models::{BuiltinService, ServiceCommand, ServiceCommandSet, ServiceInfo};

/// Supplies predefined command sets, keyed by vendor
pub trait PredefinedCommandSource: Send + Sync {
    /// Every predefined command set
    fn command_sets(&self) -> Vec<ServiceCommandSet>;

    /// Predefined commands for one vendor (empty if none)
    fn commands_for_vendor(&self, vendor_id: &str) -> Vec<ServiceCommand> {
        self.command_sets()
            .into_iter()
            .find(|s| s.vendor_id() == vendor_id)
            .map(|s| s.commands)
            .unwrap_or_default()
    }
}

/// Client commands that ship with the application
///
/// Options use `${host}`, `${port}`, `${user}`, `${password}` and `${db}`
/// placeholders that the tunnel layer fills in.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardCommands;

impl StandardCommands {
    pub fn new() -> Self {
        Self
    }

    fn commands_for(service: BuiltinService) -> Vec<ServiceCommand> {
        match service {
            BuiltinService::MongoDb => vec![ServiceCommand::new("Mongo Shell", "mongo")
                .with_options("--host ${host} --port ${port} -u ${user} -p ${password} ${db}")],
            BuiltinService::MySql => vec![ServiceCommand::new("MySQL Client", "mysql")
                .with_options("--protocol=TCP --host=${host} --port=${port} --user=${user} --password=${password} ${db}")],
            BuiltinService::PostgreSql => vec![ServiceCommand::new("psql", "psql")
                .with_options("-h ${host} -p ${port} -U ${user} -d ${db} -W")],
            BuiltinService::Redis => vec![ServiceCommand::new("Redis CLI", "redis-cli")
                .with_options("-h ${host} -p ${port} -a ${password}")],
            // no standard interactive client
            BuiltinService::RabbitMq => Vec::new(),
        }
    }
}

impl PredefinedCommandSource for StandardCommands {
    fn command_sets(&self) -> Vec<ServiceCommandSet> {
        BuiltinService::ALL
            .iter()
            .filter_map(|service| {
                let commands = Self::commands_for(*service);
                if commands.is_empty() {
                    return None;
                }
                Some(ServiceCommandSet {
                    service_info: service.service_info(),
                    commands,
                })
            })
            .collect()
    }
}

/// A predefined source backed by a plain list, handy for hosts that build
/// their baseline at startup
#[derive(Debug, Clone, Default)]
pub struct StaticCommands {
    sets: Vec<ServiceCommandSet>,
}

impl StaticCommands {
    pub fn new(sets: Vec<ServiceCommandSet>) -> Self {
        Self { sets }
    }

    pub fn single(vendor_id: &str, commands: Vec<ServiceCommand>) -> Self {
        Self::new(vec![ServiceCommandSet {
            service_info: ServiceInfo::new(vendor_id),
            commands,
        }])
    }
}

impl PredefinedCommandSource for StaticCommands {
    fn command_sets(&self) -> Vec<ServiceCommandSet> {
        self.sets.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_commands_cover_clients() {
        let standard = StandardCommands::new();
        let vendors: Vec<String> = standard
            .command_sets()
            .iter()
            .map(|s| s.vendor_id().to_string())
            .collect();

        assert!(vendors.contains(&"mysql".to_string()));
        assert!(vendors.contains(&"postgresql".to_string()));
        assert!(!vendors.contains(&"rabbitmq".to_string()));
    }

    #[test]
    fn test_commands_for_vendor() {
        let standard = StandardCommands::new();

        let psql = standard.commands_for_vendor("postgresql");
        assert_eq!(psql.len(), 1);
        assert_eq!(psql[0].command_line, "psql");
        assert!(psql[0].options.as_deref().unwrap().contains("${host}"));

        assert!(standard.commands_for_vendor("couchdb").is_empty());
    }

    #[test]
    fn test_static_commands() {
        let source = StaticCommands::single("couchdb", vec![ServiceCommand::new("curl", "curl")]);
        assert_eq!(source.commands_for_vendor("couchdb").len(), 1);
        assert!(source.commands_for_vendor("mysql").is_empty());
    }
}
