use crate::schema::{ForeignKeyTarget, TableConfig, TableLayout};
use std::any::TypeId;
use std::hash::{Hash, Hasher};

/// Static introspection over a mapped type: the ordered member stream and
/// declarative tags the registry resolves into a [`TableInfo`]. Implement
/// this by hand or generate it; the registry only consumes the descriptor.
///
/// [`TableInfo`]: crate::schema::TableInfo
pub trait Describe: 'static {
    /// The member stream and declarative tags of the type.
    fn describe() -> TypeDescriptor;

    /// Configuration applied whenever the type is registered, layered
    /// under any configuration given at registration time.
    fn table_config() -> TableConfig {
        TableConfig::new()
    }
}

/// A handle to a describable type, usable where generics cannot reach
/// (base type links, embedded and navigation members).
#[derive(Debug, Clone, Copy)]
pub struct TypeRef {
    pub(crate) id: TypeId,
    pub(crate) name: &'static str,
    pub(crate) describe: fn() -> TypeDescriptor,
    pub(crate) config: fn() -> TableConfig,
}

impl TypeRef {
    pub fn of<T: Describe>() -> Self {
        TypeRef {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
            describe: T::describe,
            config: T::table_config,
        }
    }

    /// The host-language name of the type, for diagnostics.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn id(&self) -> TypeId {
        self.id
    }
}

impl PartialEq for TypeRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeRef {}

impl Hash for TypeRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// The static description of one mapped type.
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    pub(crate) name: String,
    pub(crate) base: Option<TypeRef>,
    pub(crate) embeddable: bool,
    pub(crate) layout: Option<TableLayout>,
    pub(crate) metadata: Vec<(String, serde_json::Value)>,
    pub(crate) members: Vec<MemberDescriptor>,
}

impl TypeDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        TypeDescriptor {
            name: name.into(),
            base: None,
            embeddable: false,
            layout: None,
            metadata: Vec::new(),
            members: Vec::new(),
        }
    }

    /// Declares the supertype of the type.
    pub fn base<T: Describe>(mut self) -> Self {
        self.base = Some(TypeRef::of::<T>());
        self
    }

    /// Marks the type embeddable: it owns no table and flattens into the
    /// table of the type holding it.
    pub fn embeddable(mut self) -> Self {
        self.embeddable = true;
        self
    }

    /// Declares the inheritance layout of the type.
    pub fn layout(mut self, layout: TableLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Declares a table-level metadata entry.
    pub fn metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.push((key.into(), value));
        self
    }

    /// Appends a member. Declaration order is the column order.
    pub fn member(mut self, member: MemberDescriptor) -> Self {
        self.members.push(member);
        self
    }
}

/// What a member holds.
#[derive(Debug, Clone)]
pub enum MemberKind {
    /// A plain value mapping to one column.
    Scalar,
    /// A value of an embeddable type, flattening its members under this
    /// member's path.
    Embedded(TypeRef),
    /// A reference to another mapped type, resolved into foreign key
    /// columns against that type's primary key.
    Navigation(TypeRef),
}

/// A declarative tag on a member, equivalent to the matching
/// [`TableConfig`] call. Configuration given at registration time wins
/// over tags on the same path.
#[derive(Debug, Clone)]
pub enum MemberTag {
    ColumnName { name: String, partial: bool },
    PrimaryKey { order: Option<u32> },
    ForeignKey { targets: Vec<ForeignKeyTarget> },
    Ignore,
    Metadata { key: String, value: serde_json::Value },
}

/// One member of a type: a name, what it holds and its declarative tags.
#[derive(Debug, Clone)]
pub struct MemberDescriptor {
    pub(crate) name: String,
    pub(crate) kind: MemberKind,
    pub(crate) tags: Vec<MemberTag>,
}

impl MemberDescriptor {
    /// A plain value member.
    pub fn scalar(name: impl Into<String>) -> Self {
        MemberDescriptor {
            name: name.into(),
            kind: MemberKind::Scalar,
            tags: Vec::new(),
        }
    }

    /// A member of an embeddable type.
    pub fn embedded<T: Describe>(name: impl Into<String>) -> Self {
        MemberDescriptor {
            name: name.into(),
            kind: MemberKind::Embedded(TypeRef::of::<T>()),
            tags: Vec::new(),
        }
    }

    /// A member referencing another mapped type.
    pub fn navigation<T: Describe>(name: impl Into<String>) -> Self {
        MemberDescriptor {
            name: name.into(),
            kind: MemberKind::Navigation(TypeRef::of::<T>()),
            tags: Vec::new(),
        }
    }

    /// Overrides the trailing segment's contribution to the computed
    /// column name.
    pub fn column_name(mut self, name: impl Into<String>) -> Self {
        self.tags.push(MemberTag::ColumnName {
            name: name.into(),
            partial: true,
        });
        self
    }

    /// Replaces the whole computed column name from this member onward.
    pub fn column_name_full(mut self, name: impl Into<String>) -> Self {
        self.tags.push(MemberTag::ColumnName {
            name: name.into(),
            partial: false,
        });
        self
    }

    /// Flags the member as part of the primary key.
    pub fn primary_key(mut self) -> Self {
        self.tags.push(MemberTag::PrimaryKey { order: None });
        self
    }

    /// Flags the member as part of the primary key with an explicit
    /// position in the composite key.
    pub fn primary_key_ordered(mut self, order: u32) -> Self {
        self.tags.push(MemberTag::PrimaryKey { order: Some(order) });
        self
    }

    /// Points the member at the named key member of the referenced type.
    /// Composite targets call this once per key member, in order.
    pub fn foreign_key(mut self, target: ForeignKeyTarget) -> Self {
        match self
            .tags
            .iter_mut()
            .find_map(|tag| match tag {
                MemberTag::ForeignKey { targets } => Some(targets),
                _ => None,
            }) {
            Some(targets) => targets.push(target),
            None => self.tags.push(MemberTag::ForeignKey {
                targets: vec![target],
            }),
        }

        self
    }

    /// Excludes the member and everything nested beneath it.
    pub fn ignore(mut self) -> Self {
        self.tags.push(MemberTag::Ignore);
        self
    }

    /// Declares a metadata entry on the member.
    pub fn metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.tags.push(MemberTag::Metadata {
            key: key.into(),
            value,
        });
        self
    }
}
