use crate::schema::MetadataPolicy;

/// How a type hierarchy is laid out over tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableLayout {
    /// The type maps its own declared members only.
    #[default]
    Independent,
    /// Every level of the hierarchy owns its own table. The subtype's
    /// table optionally repeats the supertype's columns.
    TablePerType { inherit_columns: bool },
    /// The whole hierarchy shares one table; subtype members are appended
    /// after the supertype's.
    TablePerHierarchy,
    /// The type owns no table; its members flatten into the table of the
    /// type holding it, under a dotted path prefix.
    Embedded,
}

/// One target of a foreign key declaration: the name of the key member on
/// the referenced type and an optional explicit SQL column name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeyTarget {
    pub(crate) target_property: String,
    pub(crate) column_name: Option<String>,
}

impl ForeignKeyTarget {
    /// Targets the named key member, deriving the SQL column name from
    /// the member path.
    pub fn new(target_property: impl Into<String>) -> Self {
        ForeignKeyTarget {
            target_property: target_property.into(),
            column_name: None,
        }
    }

    /// Targets the named key member with an explicit SQL column name.
    pub fn with_column(target_property: impl Into<String>, column_name: impl Into<String>) -> Self {
        ForeignKeyTarget {
            target_property: target_property.into(),
            column_name: Some(column_name.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NameOverride {
    pub(crate) name: String,
    pub(crate) partial: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum MetadataOp {
    Set(serde_json::Value),
    Remove,
}

/// The canonical configuration of one type's mapping, keyed by member
/// path. Declarative tags on a type's descriptor and this fluent surface
/// both populate the same structure; when both configure the same path,
/// the fluent entry wins.
#[derive(Debug, Clone, Default)]
pub struct TableConfig {
    pub(crate) table_name: Option<String>,
    pub(crate) schema: Option<String>,
    pub(crate) layout: Option<TableLayout>,
    pub(crate) names: Vec<(String, NameOverride)>,
    pub(crate) primary_keys: Vec<(String, Option<u32>)>,
    pub(crate) ignored: Vec<String>,
    pub(crate) foreign_keys: Vec<(String, Vec<ForeignKeyTarget>)>,
    pub(crate) table_metadata: Vec<(String, MetadataOp)>,
    pub(crate) member_metadata: Vec<(String, String, MetadataOp)>,
    pub(crate) policy: Option<MetadataPolicy>,
}

impl TableConfig {
    pub fn new() -> Self {
        TableConfig::default()
    }

    /// Sets the table name, overriding the type name.
    pub fn table_name(mut self, name: impl Into<String>) -> Self {
        self.table_name = Some(name.into());
        self
    }

    /// Sets the schema the table is located in.
    pub fn schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Sets the inheritance layout of the type.
    pub fn layout(mut self, layout: TableLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Overrides the trailing segment's contribution to the computed
    /// column name of the path. The computed prefix is kept.
    pub fn column_name(mut self, path: impl Into<String>, name: impl Into<String>) -> Self {
        self.names.push((
            path.into(),
            NameOverride {
                name: name.into(),
                partial: true,
            },
        ));
        self
    }

    /// Replaces the whole computed column name from the path onward.
    /// Paths nested beneath it append after the replacement.
    pub fn column_name_full(mut self, path: impl Into<String>, name: impl Into<String>) -> Self {
        self.names.push((
            path.into(),
            NameOverride {
                name: name.into(),
                partial: false,
            },
        ));
        self
    }

    /// Flags the path as part of the primary key, positioned by
    /// declaration order.
    pub fn primary_key(mut self, path: impl Into<String>) -> Self {
        self.primary_keys.push((path.into(), None));
        self
    }

    /// Flags the path as part of the primary key with an explicit
    /// position in the composite key.
    pub fn primary_key_ordered(mut self, path: impl Into<String>, order: u32) -> Self {
        self.primary_keys.push((path.into(), Some(order)));
        self
    }

    /// Excludes the path and everything nested beneath it.
    pub fn ignore(mut self, path: impl Into<String>) -> Self {
        self.ignored.push(path.into());
        self
    }

    /// Points the navigation member at the named key member of the
    /// referenced type. Composite targets call this once per key member,
    /// in the desired column order.
    pub fn foreign_key(mut self, path: impl Into<String>, target: ForeignKeyTarget) -> Self {
        let path = path.into();

        match self.foreign_keys.iter_mut().find(|(p, _)| *p == path) {
            Some((_, targets)) => targets.push(target),
            None => self.foreign_keys.push((path, vec![target])),
        }

        self
    }

    /// Replaces the foreign key targets of the navigation member in bulk.
    pub fn foreign_key_targets(
        mut self,
        path: impl Into<String>,
        targets: Vec<ForeignKeyTarget>,
    ) -> Self {
        let path = path.into();
        self.foreign_keys.retain(|(p, _)| *p != path);
        self.foreign_keys.push((path, targets));
        self
    }

    /// Sets a table-level metadata entry.
    pub fn table_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.table_metadata.push((key.into(), MetadataOp::Set(value)));
        self
    }

    /// Removes a previously added table-level metadata entry.
    pub fn remove_table_metadata(mut self, key: impl Into<String>) -> Self {
        self.table_metadata.push((key.into(), MetadataOp::Remove));
        self
    }

    /// Sets a metadata entry on the member path.
    pub fn member_metadata(
        mut self,
        path: impl Into<String>,
        key: impl Into<String>,
        value: serde_json::Value,
    ) -> Self {
        self.member_metadata
            .push((path.into(), key.into(), MetadataOp::Set(value)));
        self
    }

    /// Removes a previously added metadata entry from the member path.
    pub fn remove_member_metadata(
        mut self,
        path: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        self.member_metadata
            .push((path.into(), key.into(), MetadataOp::Remove));
        self
    }

    /// Sets the metadata inheritance policy of the type.
    pub fn metadata_policy(mut self, policy: MetadataPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Layers `other` on top of this configuration: scalar settings in
    /// `other` replace these, path-keyed entries append after them so the
    /// later writer wins.
    pub fn merge(mut self, other: TableConfig) -> Self {
        self.table_name = other.table_name.or(self.table_name);
        self.schema = other.schema.or(self.schema);
        self.layout = other.layout.or(self.layout);
        self.policy = other.policy.or(self.policy);

        self.names.extend(other.names);
        self.primary_keys.extend(other.primary_keys);
        self.ignored.extend(other.ignored);
        self.table_metadata.extend(other.table_metadata);
        self.member_metadata.extend(other.member_metadata);

        for (path, targets) in other.foreign_keys {
            self.foreign_keys.retain(|(p, _)| *p != path);
            self.foreign_keys.push((path, targets));
        }

        self
    }
}
