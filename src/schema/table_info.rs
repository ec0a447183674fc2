use indexmap::IndexMap;

/// The immutable, resolved schema record of one registered type: the flat
/// column model the compiler consults when a fragment references a mapped
/// member.
///
/// `columns` and the path-to-name map are always in 1:1, order-preserving
/// correspondence; `primary_keys` and `foreign_keys` are member paths
/// appearing in `columns`.
#[derive(Debug, Clone, PartialEq)]
pub struct TableInfo {
    pub(crate) type_name: String,
    pub(crate) table_name: String,
    pub(crate) schema: Option<String>,
    pub(crate) primary_keys: Vec<String>,
    pub(crate) foreign_keys: Vec<String>,
    pub(crate) columns: Vec<String>,
    pub(crate) column_names: IndexMap<String, String>,
    pub(crate) table_metadata: IndexMap<String, serde_json::Value>,
    pub(crate) member_metadata: IndexMap<String, IndexMap<String, serde_json::Value>>,
}

impl TableInfo {
    /// The declared name of the resolved type.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The SQL table name.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// The schema the table is located in, if any.
    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    /// The member paths forming the primary key, in composite order.
    pub fn primary_keys(&self) -> &[String] {
        &self.primary_keys
    }

    /// The member paths forming foreign keys. Composite groups are kept
    /// adjacent, in declared override order.
    pub fn foreign_keys(&self) -> &[String] {
        &self.foreign_keys
    }

    /// Every mapped member path, in walk order. Nested embedded paths are
    /// flattened as `Outer.Inner`.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// The SQL name of the member path, if the path is mapped.
    pub fn column_name(&self, path: &str) -> Option<&str> {
        self.column_names.get(path).map(|name| name.as_str())
    }

    /// Every SQL column name, in the same order as [`columns`](Self::columns).
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.column_names.values().map(|name| name.as_str())
    }

    /// Table-level metadata after inheritance merging.
    pub fn table_metadata(&self) -> &IndexMap<String, serde_json::Value> {
        &self.table_metadata
    }

    /// Metadata of the member path after inheritance merging, if any was
    /// declared.
    pub fn member_metadata(&self, path: &str) -> Option<&IndexMap<String, serde_json::Value>> {
        self.member_metadata.get(path)
    }
}
