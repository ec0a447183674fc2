//! Resolving declared types into flat column models.
//!
//! A [`SchemaRegistry`] takes types describable through [`Describe`] and
//! resolves each into an immutable [`TableInfo`]: the ordered column
//! paths, their SQL names, primary and foreign keys, and merged metadata.
//! Table fragments built with [`Table::for_type`] consult the record
//! whenever a member path is resolved into a column.
//!
//! [`Table::for_type`]: crate::ast::Table::for_type

mod config;
mod descriptor;
mod metadata;
mod resolver;
mod table_info;

pub use config::{ForeignKeyTarget, TableConfig, TableLayout};
pub use descriptor::{Describe, MemberDescriptor, MemberKind, MemberTag, TypeDescriptor, TypeRef};
pub use metadata::{MetadataIgnore, MetadataInheritance, MetadataPolicy};
pub use table_info::TableInfo;

use crate::error::{Error, ErrorKind};
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// The registry of resolved types. Registration happens during a
/// single-threaded setup phase; afterwards lookups are read-only and the
/// registry can be shared freely.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    tables: HashMap<TypeId, Arc<TableInfo>>,
    order: Vec<TypeRef>,
    default_layout: TableLayout,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        SchemaRegistry::default()
    }

    /// A registry whose types default to the given inheritance layout
    /// when neither their descriptors nor their configuration set one.
    pub fn with_default_layout(default_layout: TableLayout) -> Self {
        SchemaRegistry {
            default_layout,
            ..SchemaRegistry::default()
        }
    }

    /// Registers a type using its declarative tags and
    /// [`Describe::table_config`] alone.
    pub fn register<T: Describe>(&mut self) -> crate::Result<Arc<TableInfo>> {
        self.register_with::<T>(TableConfig::new())
    }

    /// Registers a type, layering the given configuration over the type's
    /// own. Registering an already-registered type returns the existing
    /// record unchanged; the first registration wins.
    pub fn register_with<T: Describe>(
        &mut self,
        config: TableConfig,
    ) -> crate::Result<Arc<TableInfo>> {
        let ty = TypeRef::of::<T>();

        if let Some(existing) = self.tables.get(&ty.id()) {
            return Ok(existing.clone());
        }

        let info = Arc::new(resolver::resolve(ty, config, self.default_layout)?);

        debug!(
            type_name = %info.type_name(),
            table = %info.table_name(),
            columns = info.columns().len(),
            "registered type"
        );

        self.tables.insert(ty.id(), info.clone());
        self.order.push(ty);

        Ok(info)
    }

    /// The resolved record of the type. Looking up an unregistered type
    /// is an invalid-configuration error.
    pub fn get<T: Describe>(&self) -> crate::Result<Arc<TableInfo>> {
        self.try_get::<T>().ok_or_else(|| {
            Error::builder(ErrorKind::invalid_configuration(format!(
                "the type `{}` is not registered",
                std::any::type_name::<T>()
            )))
            .build()
        })
    }

    /// The resolved record of the type, or `None` when unregistered.
    pub fn try_get<T: Describe>(&self) -> Option<Arc<TableInfo>> {
        self.try_get_by_id(TypeId::of::<T>())
    }

    /// The non-generic variant of [`get`](Self::get).
    pub fn get_by_id(&self, id: TypeId) -> crate::Result<Arc<TableInfo>> {
        self.try_get_by_id(id).ok_or_else(|| {
            Error::builder(ErrorKind::invalid_configuration(
                "the requested type is not registered",
            ))
            .build()
        })
    }

    /// The non-generic variant of [`try_get`](Self::try_get).
    pub fn try_get_by_id(&self, id: TypeId) -> Option<Arc<TableInfo>> {
        self.tables.get(&id).cloned()
    }

    /// Every registered type, in registration order.
    pub fn registered_types(&self) -> &[TypeRef] {
        &self.order
    }

    /// `true` if the type has been registered.
    pub fn is_table<T: Describe>(&self) -> bool {
        self.tables.contains_key(&TypeId::of::<T>())
    }

    /// `true` if the record is the one registered for the type.
    pub fn is_table_of<T: Describe>(&self, info: &TableInfo) -> bool {
        self.try_get::<T>()
            .is_some_and(|registered| registered.as_ref() == info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn paths(paths: &[String]) -> Vec<&str> {
        paths.iter().map(|p| p.as_str()).collect()
    }

    struct Address;

    impl Describe for Address {
        fn describe() -> TypeDescriptor {
            TypeDescriptor::new("Address")
                .embeddable()
                .member(MemberDescriptor::scalar("Street"))
                .member(MemberDescriptor::scalar("City").metadata("index", json!(true)))
        }
    }

    struct Person;

    impl Describe for Person {
        fn describe() -> TypeDescriptor {
            TypeDescriptor::new("Person")
                .member(MemberDescriptor::scalar("Id").primary_key())
                .member(MemberDescriptor::scalar("Name"))
                .member(MemberDescriptor::scalar("Salary"))
                .member(MemberDescriptor::embedded::<Address>("Home"))
        }
    }

    struct OrderLine;

    impl Describe for OrderLine {
        fn describe() -> TypeDescriptor {
            TypeDescriptor::new("OrderLine")
                .member(MemberDescriptor::scalar("OrderId").primary_key_ordered(0))
                .member(MemberDescriptor::scalar("LineNumber").primary_key_ordered(1))
                .member(MemberDescriptor::scalar("Quantity"))
        }
    }

    struct Shipment;

    impl Describe for Shipment {
        fn describe() -> TypeDescriptor {
            TypeDescriptor::new("Shipment")
                .member(MemberDescriptor::scalar("Id").primary_key())
                .member(
                    MemberDescriptor::navigation::<OrderLine>("Line")
                        .foreign_key(ForeignKeyTarget::new("OrderId"))
                        .foreign_key(ForeignKeyTarget::new("LineNumber")),
                )
        }
    }

    struct Employee;

    impl Describe for Employee {
        fn describe() -> TypeDescriptor {
            TypeDescriptor::new("Employee")
                .base::<Person>()
                .member(MemberDescriptor::scalar("Badge"))
        }
    }

    struct Invoice;

    impl Describe for Invoice {
        fn describe() -> TypeDescriptor {
            TypeDescriptor::new("Invoice")
                .member(MemberDescriptor::scalar("Id").primary_key())
                .member(MemberDescriptor::navigation::<Person>("Issuer"))
                .member(MemberDescriptor::scalar("Secret").ignore())
        }
    }

    #[test]
    fn a_nested_type_flattens_under_a_dotted_path() {
        let mut registry = SchemaRegistry::new();
        let info = registry.register::<Person>().unwrap();

        assert_eq!("Person", info.table_name());
        assert_eq!(
            vec!["Id", "Name", "Salary", "Home.Street", "Home.City"],
            paths(info.columns())
        );
        assert_eq!(Some("HomeStreet"), info.column_name("Home.Street"));
        assert_eq!(vec!["Id"], paths(info.primary_keys()));
    }

    #[test]
    fn columns_and_names_stay_in_lockstep() {
        let mut registry = SchemaRegistry::new();
        let info = registry.register::<Person>().unwrap();

        assert_eq!(info.columns().len(), info.column_names().count());

        for (path, name) in info.columns().iter().zip(info.column_names()) {
            assert_eq!(info.column_name(path), Some(name));
        }
    }

    #[test]
    fn a_partial_override_replaces_only_the_trailing_segment() {
        let mut registry = SchemaRegistry::new();
        let config = TableConfig::new().column_name("Home.City", "Town");
        let info = registry.register_with::<Person>(config).unwrap();

        assert_eq!(Some("HomeTown"), info.column_name("Home.City"));
        assert_eq!(Some("HomeStreet"), info.column_name("Home.Street"));
    }

    #[test]
    fn a_full_override_replaces_the_name_from_the_segment_onward() {
        let mut registry = SchemaRegistry::new();
        let config = TableConfig::new().column_name_full("Home", "addr");
        let info = registry.register_with::<Person>(config).unwrap();

        assert_eq!(Some("addrStreet"), info.column_name("Home.Street"));
        assert_eq!(Some("addrCity"), info.column_name("Home.City"));
    }

    #[test]
    fn a_composite_foreign_key_resolves_one_path_per_target_in_declared_order() {
        let mut registry = SchemaRegistry::new();
        let info = registry.register::<Shipment>().unwrap();

        assert_eq!(
            vec!["Line.OrderId", "Line.LineNumber"],
            paths(info.foreign_keys())
        );

        for path in info.foreign_keys() {
            assert!(info.columns().contains(path));
        }
    }

    #[test]
    fn a_navigation_member_defaults_to_the_sole_primary_key() {
        let mut registry = SchemaRegistry::new();
        let info = registry.register::<Invoice>().unwrap();

        assert_eq!(vec!["Issuer.Id"], paths(info.foreign_keys()));
        assert_eq!(Some("IssuerId"), info.column_name("Issuer.Id"));
    }

    #[test]
    fn a_composite_target_without_overrides_is_an_invalid_configuration() {
        struct Bare;

        impl Describe for Bare {
            fn describe() -> TypeDescriptor {
                TypeDescriptor::new("Bare")
                    .member(MemberDescriptor::navigation::<OrderLine>("Line"))
            }
        }

        let mut registry = SchemaRegistry::new();
        let err = registry.register::<Bare>().unwrap_err();

        assert!(err.is_invalid_configuration());
    }

    #[test]
    fn an_empty_target_property_is_an_invalid_configuration() {
        struct Sloppy;

        impl Describe for Sloppy {
            fn describe() -> TypeDescriptor {
                TypeDescriptor::new("Sloppy").member(
                    MemberDescriptor::navigation::<Invoice>("Doc")
                        .foreign_key(ForeignKeyTarget::new("")),
                )
            }
        }

        let mut registry = SchemaRegistry::new();
        let err = registry.register::<Sloppy>().unwrap_err();

        assert!(err.is_invalid_configuration());
    }

    #[test]
    fn an_explicit_foreign_key_column_name_is_used_verbatim() {
        struct Billed;

        impl Describe for Billed {
            fn describe() -> TypeDescriptor {
                TypeDescriptor::new("Billed").member(
                    MemberDescriptor::navigation::<Invoice>("Doc")
                        .foreign_key(ForeignKeyTarget::with_column("Id", "invoice_fk")),
                )
            }
        }

        let mut registry = SchemaRegistry::new();
        let info = registry.register::<Billed>().unwrap();

        assert_eq!(Some("invoice_fk"), info.column_name("Doc.Id"));
    }

    #[test]
    fn ignoring_a_member_excludes_its_subtree() {
        let mut registry = SchemaRegistry::new();
        let config = TableConfig::new().ignore("Home");
        let info = registry.register_with::<Person>(config).unwrap();

        assert_eq!(vec!["Id", "Name", "Salary"], paths(info.columns()));
    }

    #[test]
    fn composite_primary_keys_are_ordered_explicitly() {
        let mut registry = SchemaRegistry::new();
        let info = registry.register::<OrderLine>().unwrap();

        assert_eq!(vec!["OrderId", "LineNumber"], paths(info.primary_keys()));
    }

    #[test]
    fn table_per_hierarchy_appends_subtype_members() {
        let mut registry = SchemaRegistry::new();
        let config = TableConfig::new().layout(TableLayout::TablePerHierarchy);
        let info = registry.register_with::<Employee>(config).unwrap();

        assert_eq!(
            vec!["Id", "Name", "Salary", "Home.Street", "Home.City", "Badge"],
            paths(info.columns())
        );
        assert_eq!(vec!["Id"], paths(info.primary_keys()));
    }

    #[test]
    fn table_per_type_keeps_the_subtype_columns_only_unless_inheriting() {
        let mut registry = SchemaRegistry::new();
        let config = TableConfig::new().layout(TableLayout::TablePerType {
            inherit_columns: false,
        });
        let info = registry.register_with::<Employee>(config).unwrap();

        assert_eq!(vec!["Badge"], paths(info.columns()));

        let mut registry = SchemaRegistry::new();
        let config = TableConfig::new().layout(TableLayout::TablePerType {
            inherit_columns: true,
        });
        let info = registry.register_with::<Employee>(config).unwrap();

        assert!(info.columns().contains(&"Badge".to_string()));
        assert!(info.columns().contains(&"Name".to_string()));
    }

    #[test]
    fn member_metadata_defaults_to_the_declaring_level() {
        let mut registry = SchemaRegistry::new();
        let info = registry.register::<Person>().unwrap();

        let meta = info.member_metadata("Home.City").unwrap();
        assert_eq!(json!(true), meta["index"]);
    }

    #[test]
    fn table_metadata_inherits_only_under_the_always_policy() {
        struct Tagged;

        impl Describe for Tagged {
            fn describe() -> TypeDescriptor {
                TypeDescriptor::new("Tagged")
                    .metadata("audit", json!("base"))
                    .member(MemberDescriptor::scalar("Id").primary_key())
            }
        }

        struct SubTagged;

        impl Describe for SubTagged {
            fn describe() -> TypeDescriptor {
                TypeDescriptor::new("SubTagged")
                    .base::<Tagged>()
                    .layout(TableLayout::TablePerHierarchy)
                    .member(MemberDescriptor::scalar("Extra"))
            }
        }

        let mut registry = SchemaRegistry::new();
        let info = registry.register::<SubTagged>().unwrap();
        assert!(info.table_metadata().is_empty());

        let mut registry = SchemaRegistry::new();
        let config = TableConfig::new().metadata_policy(MetadataPolicy::always());
        let info = registry.register_with::<SubTagged>(config).unwrap();
        assert_eq!(json!("base"), info.table_metadata()["audit"]);
    }

    #[test]
    fn removing_metadata_at_the_same_level_wins_before_finalization() {
        let mut registry = SchemaRegistry::new();
        let config = TableConfig::new()
            .table_metadata("temp", json!(1))
            .remove_table_metadata("temp");

        let info = registry.register_with::<Person>(config).unwrap();
        assert!(info.table_metadata().is_empty());
    }

    #[test]
    fn re_registration_is_idempotent_and_the_first_wins() {
        let mut registry = SchemaRegistry::new();
        let first = registry
            .register_with::<Person>(TableConfig::new().table_name("people"))
            .unwrap();
        let second = registry
            .register_with::<Person>(TableConfig::new().table_name("persons"))
            .unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!("people", second.table_name());
        assert_eq!(1, registry.registered_types().len());
    }

    #[test]
    fn the_throwing_lookup_rejects_unregistered_types() {
        let registry = SchemaRegistry::new();

        assert!(registry.try_get::<Person>().is_none());
        assert!(registry.get::<Person>().unwrap_err().is_invalid_configuration());
        assert!(!registry.is_table::<Person>());
    }

    #[test]
    fn is_table_of_matches_the_registered_record() {
        let mut registry = SchemaRegistry::new();
        let person = registry.register::<Person>().unwrap();
        let line = registry.register::<OrderLine>().unwrap();

        assert!(registry.is_table_of::<Person>(&person));
        assert!(!registry.is_table_of::<Person>(&line));
    }
}
