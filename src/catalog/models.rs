/// Command catalog data model
///
/// Everything in here is what gets written to the preference store. Field
/// names are camelCase on the wire, unknown fields are ignored on read and
/// missing ones or explicit `null`s fall back to their defaults.

use serde::{Deserialize, Deserializer, Serialize};

/// Reads `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Terminal used to run service commands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandTerminal {
    #[serde(default, deserialize_with = "null_as_default")]
    pub platform_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub path: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub args: Vec<String>,
}

impl CommandTerminal {
    pub fn new(platform_id: &str, path: &str, args: &[&str]) -> Self {
        Self {
            platform_id: platform_id.to_string(),
            path: path.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Full command line, path first
    pub fn command_line(&self) -> String {
        std::iter::once(self.path.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Identifies a service backend plus some display metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInfo {
    #[serde(default, deserialize_with = "null_as_default")]
    pub vendor_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl ServiceInfo {
    pub fn new(vendor_id: &str) -> Self {
        Self {
            vendor_id: vendor_id.to_string(),
            display_name: None,
            version: None,
        }
    }

    pub fn with_display_name(mut self, display_name: &str) -> Self {
        self.display_name = Some(display_name.to_string());
        self
    }

    /// Display name if set, otherwise the vendor id
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.vendor_id)
    }
}

/// One named command for a service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCommand {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub command_line: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<String>,
}

impl ServiceCommand {
    pub fn new(name: &str, command_line: &str) -> Self {
        Self {
            name: name.to_string(),
            command_line: command_line.to_string(),
            options: None,
        }
    }

    pub fn with_options(mut self, options: &str) -> Self {
        self.options = Some(options.to_string());
        self
    }
}

/// All commands for one service vendor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCommandSet {
    #[serde(default, deserialize_with = "null_as_default")]
    pub service_info: ServiceInfo,
    #[serde(default, deserialize_with = "null_as_default")]
    pub commands: Vec<ServiceCommand>,
}

impl ServiceCommandSet {
    pub fn new(service_info: ServiceInfo) -> Self {
        Self {
            service_info,
            commands: Vec::new(),
        }
    }

    pub fn vendor_id(&self) -> &str {
        &self.service_info.vendor_id
    }

    pub fn command(&self, name: &str) -> Option<&ServiceCommand> {
        self.commands.iter().find(|c| c.name == name)
    }
}

/// The persisted catalog: default terminal plus one command set per vendor
///
/// Vendor ids are expected to be unique across `services`. Lookups take the
/// first match, and every helper here that adds entries keeps it that way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandCatalog {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_terminal: Option<CommandTerminal>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub services: Vec<ServiceCommandSet>,
}

impl CommandCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// First command set whose vendor id equals `vendor_id` exactly
    pub fn service(&self, vendor_id: &str) -> Option<&ServiceCommandSet> {
        self.services.iter().find(|s| s.vendor_id() == vendor_id)
    }

    pub fn service_mut(&mut self, vendor_id: &str) -> Option<&mut ServiceCommandSet> {
        self.services.iter_mut().find(|s| s.vendor_id() == vendor_id)
    }

    /// Commands for `vendor_id`, if the vendor is present
    pub fn commands_for_vendor(&self, vendor_id: &str) -> Option<&[ServiceCommand]> {
        self.service(vendor_id).map(|s| s.commands.as_slice())
    }

    /// Get the entry for a vendor, appending an empty one if missing
    pub fn ensure_service(&mut self, service_info: ServiceInfo) -> &mut ServiceCommandSet {
        let existing = self
            .services
            .iter()
            .position(|s| s.vendor_id() == service_info.vendor_id);

        let index = match existing {
            Some(index) => index,
            None => {
                self.services.push(ServiceCommandSet::new(service_info));
                self.services.len() - 1
            }
        };

        &mut self.services[index]
    }

    /// Merge commands into the vendor's entry
    ///
    /// Creates the entry if absent. Commands whose name already exists in
    /// that entry are skipped. Returns how many were added.
    pub fn add_commands(&mut self, service_info: ServiceInfo, commands: &[ServiceCommand]) -> usize {
        let set = self.ensure_service(service_info);
        let mut added = 0;

        for command in commands {
            if set.command(&command.name).is_none() {
                set.commands.push(command.clone());
                added += 1;
            }
        }

        added
    }

    /// Remove a named command. Returns the removed command if it existed.
    pub fn remove_command(&mut self, vendor_id: &str, name: &str) -> Option<ServiceCommand> {
        let set = self.service_mut(vendor_id)?;
        let index = set.commands.iter().position(|c| c.name == name)?;
        Some(set.commands.remove(index))
    }

    pub fn vendor_ids(&self) -> Vec<&str> {
        self.services.iter().map(|s| s.vendor_id()).collect()
    }
}

/// Service vendors every fresh catalog starts with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinService {
    MongoDb,
    MySql,
    PostgreSql,
    Redis,
    RabbitMq,
}

impl BuiltinService {
    pub const ALL: [BuiltinService; 5] = [
        BuiltinService::MongoDb,
        BuiltinService::MySql,
        BuiltinService::PostgreSql,
        BuiltinService::Redis,
        BuiltinService::RabbitMq,
    ];

    pub fn vendor_id(&self) -> &'static str {
        match self {
            BuiltinService::MongoDb => "mongodb",
            BuiltinService::MySql => "mysql",
            BuiltinService::PostgreSql => "postgresql",
            BuiltinService::Redis => "redis",
            BuiltinService::RabbitMq => "rabbitmq",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            BuiltinService::MongoDb => "MongoDB",
            BuiltinService::MySql => "MySQL",
            BuiltinService::PostgreSql => "PostgreSQL",
            BuiltinService::Redis => "Redis",
            BuiltinService::RabbitMq => "RabbitMQ",
        }
    }

    pub fn service_info(&self) -> ServiceInfo {
        ServiceInfo::new(self.vendor_id()).with_display_name(self.display_name())
    }
}

impl std::fmt::Display for BuiltinService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.vendor_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_sensitive() {
        let mut catalog = CommandCatalog::new();
        catalog.add_commands(ServiceInfo::new("mysql"), &[ServiceCommand::new("mysql", "mysql")]);

        assert!(catalog.commands_for_vendor("mysql").is_some());
        assert!(catalog.commands_for_vendor("MySQL").is_none());
    }

    #[test]
    fn test_first_match_wins() {
        let mut first = ServiceCommandSet::new(ServiceInfo::new("redis"));
        first.commands.push(ServiceCommand::new("first", "redis-cli"));
        let mut second = ServiceCommandSet::new(ServiceInfo::new("redis"));
        second.commands.push(ServiceCommand::new("second", "redis-cli"));

        let catalog = CommandCatalog {
            default_terminal: None,
            services: vec![first, second],
        };

        let commands = catalog.commands_for_vendor("redis").unwrap();
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].name, "first");
    }

    #[test]
    fn test_add_commands_merges_by_vendor() {
        let mut catalog = CommandCatalog::new();
        catalog.ensure_service(ServiceInfo::new("mongodb"));

        let added = catalog.add_commands(
            ServiceInfo::new("mongodb"),
            &[
                ServiceCommand::new("shell", "mongo"),
                ServiceCommand::new("shell", "mongosh"),
            ],
        );

        assert_eq!(added, 1);
        assert_eq!(catalog.services.len(), 1);
        assert_eq!(catalog.commands_for_vendor("mongodb").unwrap()[0].command_line, "mongo");
    }

    #[test]
    fn test_remove_command() {
        let mut catalog = CommandCatalog::new();
        catalog.add_commands(ServiceInfo::new("redis"), &[ServiceCommand::new("cli", "redis-cli")]);

        assert!(catalog.remove_command("redis", "cli").is_some());
        assert!(catalog.remove_command("redis", "cli").is_none());
        assert!(catalog.remove_command("nope", "cli").is_none());
        assert!(catalog.commands_for_vendor("redis").unwrap().is_empty());
    }

    #[test]
    fn test_unknown_and_missing_fields() {
        let json = r#"{
            "services": [{
                "serviceInfo": {"vendorId": "mysql", "plan": "free"},
                "commands": [{"name": "psql", "colour": "blue"}]
            }],
            "somethingNew": 42
        }"#;

        let catalog: CommandCatalog = serde_json::from_str(json).unwrap();

        assert!(catalog.default_terminal.is_none());
        let commands = catalog.commands_for_vendor("mysql").unwrap();
        assert_eq!(commands[0].name, "psql");
        assert_eq!(commands[0].command_line, "");
        assert!(commands[0].options.is_none());
    }

    #[test]
    fn test_null_fields_read_as_defaults() {
        let json = r#"{
            "defaultTerminal": {"platformId": null, "path": "/usr/bin/xterm", "args": null},
            "services": [
                {"serviceInfo": {"vendorId": "mysql", "displayName": null},
                 "commands": [{"name": "mine", "commandLine": null, "options": null}]},
                {"serviceInfo": null, "commands": null}
            ]
        }"#;

        let catalog: CommandCatalog = serde_json::from_str(json).unwrap();

        let terminal = catalog.default_terminal.as_ref().unwrap();
        assert_eq!(terminal.platform_id, "");
        assert!(terminal.args.is_empty());

        let commands = catalog.commands_for_vendor("mysql").unwrap();
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].name, "mine");
        assert_eq!(commands[0].command_line, "");
        assert!(commands[0].options.is_none());

        assert_eq!(catalog.services[1].vendor_id(), "");
        assert!(catalog.services[1].commands.is_empty());

        let empty: CommandCatalog = serde_json::from_str(r#"{"services": null}"#).unwrap();
        assert!(empty.services.is_empty());
    }

    #[test]
    fn test_wire_names_are_camel_case() {
        let mut catalog = CommandCatalog::new();
        catalog.default_terminal = Some(CommandTerminal::new("linux", "/usr/bin/xterm", &["-e"]));
        catalog.add_commands(ServiceInfo::new("redis"), &[ServiceCommand::new("cli", "redis-cli")]);

        let json = serde_json::to_string(&catalog).unwrap();

        assert!(json.contains("\"defaultTerminal\""));
        assert!(json.contains("\"platformId\""));
        assert!(json.contains("\"serviceInfo\""));
        assert!(json.contains("\"vendorId\""));
        assert!(json.contains("\"commandLine\""));
    }

    #[test]
    fn test_terminal_command_line() {
        let terminal = CommandTerminal::new("win32", "cmd.exe", &["/c", "start"]);
        assert_eq!(terminal.command_line(), "cmd.exe /c start");
    }

    #[test]
    fn test_builtin_vendor_ids_are_unique() {
        let mut ids: Vec<_> = BuiltinService::ALL.iter().map(|s| s.vendor_id()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), BuiltinService::ALL.len());
    }
}
