use crate::error::{Error, ErrorKind};
use crate::schema::config::{MetadataOp, NameOverride};
use crate::schema::descriptor::{MemberDescriptor, MemberKind, MemberTag, TypeDescriptor, TypeRef};
use crate::schema::metadata::{merge_levels, MetadataPolicy};
use crate::schema::{ForeignKeyTarget, TableConfig, TableInfo, TableLayout};
use indexmap::IndexMap;
use std::any::TypeId;
use std::borrow::Cow;
use tracing::trace;

fn invalid_configuration(msg: impl Into<Cow<'static, str>>) -> Error {
    Error::builder(ErrorKind::invalid_configuration(msg)).build()
}

/// Resolves one type into its flat column model: walks the member graph
/// depth-first, flattening embedded types under dotted path prefixes and
/// turning navigation members into foreign key columns against the
/// referenced type's primary key.
pub(crate) fn resolve(
    ty: TypeRef,
    registration: TableConfig,
    default_layout: TableLayout,
) -> crate::Result<TableInfo> {
    let config = (ty.config)().merge(registration);
    let ancestry = ancestry(ty)?;

    let (_, leaf) = ancestry.last().ok_or_else(|| {
        invalid_configuration("a type descriptor chain cannot be empty")
    })?;

    let layout = effective_layout(&ancestry, &config, default_layout);

    // The member stream: which hierarchy levels contribute columns to
    // this type's table.
    let levels: Vec<usize> = match layout {
        TableLayout::TablePerHierarchy => (0..ancestry.len()).collect(),
        TableLayout::TablePerType {
            inherit_columns: true,
        } => (0..ancestry.len()).collect(),
        _ => vec![ancestry.len() - 1],
    };

    let mut walker = Walker::new(&config);

    for level in levels.iter() {
        walker.begin_level();

        let (walked_ty, descriptor) = &ancestry[*level];
        let mut stack = vec![walked_ty.id()];
        walker.walk_members(&descriptor.members, "", &mut stack)?;
    }

    walker.apply_member_metadata_ops(&config);

    let policy = config.policy.clone().unwrap_or_default();
    let table_metadata = merge_levels(&table_metadata_levels(&ancestry, &config), &policy);
    let member_metadata = walker.merge_member_metadata(&policy);

    let mut primary_keys = walker.primary_keys;
    primary_keys.sort_by_key(|(_, order, seq)| (order.map(u64::from).unwrap_or(*seq as u64), *seq));

    let primary_keys: Vec<String> = primary_keys
        .into_iter()
        .map(|(path, _, _)| path)
        .filter(|path| walker.names.contains_key(path))
        .collect();

    let info = TableInfo {
        type_name: leaf.name.clone(),
        table_name: config.table_name.clone().unwrap_or_else(|| leaf.name.clone()),
        schema: config.schema.clone(),
        primary_keys,
        foreign_keys: walker.foreign_keys,
        columns: walker.columns,
        column_names: walker.names,
        table_metadata,
        member_metadata,
    };

    trace!(
        type_name = %info.type_name,
        table = %info.table_name,
        columns = info.columns.len(),
        "resolved type"
    );

    Ok(info)
}

/// The base chain of the type, root first, the type itself last.
fn ancestry(ty: TypeRef) -> crate::Result<Vec<(TypeRef, TypeDescriptor)>> {
    let mut chain = Vec::new();
    let mut seen = vec![ty.id()];
    let mut current = Some(ty);

    while let Some(ty) = current {
        let descriptor = (ty.describe)();
        current = descriptor.base;

        if let Some(base) = current {
            if seen.contains(&base.id()) {
                return Err(invalid_configuration(format!(
                    "the base chain of `{}` is cyclic",
                    ty.name()
                )));
            }

            seen.push(base.id());
        }

        chain.push((ty, descriptor));
    }

    chain.reverse();
    Ok(chain)
}

/// The nearest explicit layout setting walking from the type up its base
/// chain; embeddable types default to the embedded layout, everything
/// else to the registry-wide default.
fn effective_layout(
    ancestry: &[(TypeRef, TypeDescriptor)],
    config: &TableConfig,
    default_layout: TableLayout,
) -> TableLayout {
    if let Some(layout) = config.layout {
        return layout;
    }

    for (ty, descriptor) in ancestry.iter().rev() {
        if let Some(layout) = (ty.config)().layout {
            return layout;
        }

        if let Some(layout) = descriptor.layout {
            return layout;
        }
    }

    if ancestry.last().is_some_and(|(_, leaf)| leaf.embeddable) {
        return TableLayout::Embedded;
    }

    default_layout
}

/// Per-level table metadata, root level first: the descriptor's declared
/// entries with the level's configuration operations applied on top. The
/// leaf level uses the merged registration configuration.
fn table_metadata_levels(
    ancestry: &[(TypeRef, TypeDescriptor)],
    config: &TableConfig,
) -> Vec<IndexMap<String, serde_json::Value>> {
    let mut levels = Vec::with_capacity(ancestry.len());

    for (i, (ty, descriptor)) in ancestry.iter().enumerate() {
        let mut level: IndexMap<String, serde_json::Value> =
            descriptor.metadata.iter().cloned().collect();

        let is_leaf = i == ancestry.len() - 1;
        let ops = if is_leaf {
            config.table_metadata.clone()
        } else {
            (ty.config)().table_metadata
        };

        for (key, op) in ops {
            match op {
                MetadataOp::Set(value) => {
                    level.insert(key, value);
                }
                MetadataOp::Remove => {
                    level.shift_remove(&key);
                }
            }
        }

        levels.push(level);
    }

    levels
}

struct Walker {
    overrides: IndexMap<String, NameOverride>,
    ignored: Vec<String>,
    fk_targets: IndexMap<String, Vec<ForeignKeyTarget>>,
    columns: Vec<String>,
    names: IndexMap<String, String>,
    primary_keys: Vec<(String, Option<u32>, usize)>,
    foreign_keys: Vec<String>,
    member_meta_levels: Vec<IndexMap<String, IndexMap<String, serde_json::Value>>>,
    pk_seq: usize,
}

impl Walker {
    fn new(config: &TableConfig) -> Self {
        let mut overrides = IndexMap::new();

        // Later writers win, so the configuration entries go in first and
        // in order; tags only fill paths the configuration left alone.
        for (path, name_override) in config.names.iter() {
            overrides.insert(path.clone(), name_override.clone());
        }

        let mut primary_keys = Vec::new();
        let mut pk_seq = 0;

        for (path, order) in config.primary_keys.iter() {
            if !primary_keys.iter().any(|(p, _, _): &(String, _, _)| p == path) {
                primary_keys.push((path.clone(), *order, pk_seq));
                pk_seq += 1;
            }
        }

        let fk_targets = config
            .foreign_keys
            .iter()
            .map(|(path, targets)| (path.clone(), targets.clone()))
            .collect();

        Walker {
            overrides,
            ignored: config.ignored.clone(),
            fk_targets,
            columns: Vec::new(),
            names: IndexMap::new(),
            primary_keys,
            foreign_keys: Vec::new(),
            member_meta_levels: Vec::new(),
            pk_seq,
        }
    }

    fn begin_level(&mut self) {
        self.member_meta_levels.push(IndexMap::new());
    }

    fn walk_members(
        &mut self,
        members: &[MemberDescriptor],
        prefix: &str,
        stack: &mut Vec<TypeId>,
    ) -> crate::Result<()> {
        for member in members {
            let path = if prefix.is_empty() {
                member.name.clone()
            } else {
                format!("{prefix}.{}", member.name)
            };

            let tag_ignored = member
                .tags
                .iter()
                .any(|tag| matches!(tag, MemberTag::Ignore));

            if tag_ignored || self.is_ignored(&path) {
                continue;
            }

            self.collect_tags(&path, &member.tags);

            match &member.kind {
                MemberKind::Scalar => {
                    self.push_column(&path);

                    if self.fk_targets.contains_key(&path) {
                        self.foreign_keys.push(path.clone());
                    }
                }
                MemberKind::Embedded(ty) => {
                    if stack.contains(&ty.id()) {
                        return Err(invalid_configuration(format!(
                            "`{}` embeds itself through `{path}`",
                            ty.name()
                        )));
                    }

                    let descriptor = (ty.describe)();

                    stack.push(ty.id());
                    self.walk_members(&descriptor.members, &path, stack)?;
                    stack.pop();
                }
                MemberKind::Navigation(ty) => self.resolve_navigation(&path, *ty)?,
            }
        }

        Ok(())
    }

    fn collect_tags(&mut self, path: &str, tags: &[MemberTag]) {
        for tag in tags {
            match tag {
                MemberTag::ColumnName { name, partial } => {
                    self.overrides
                        .entry(path.to_string())
                        .or_insert_with(|| NameOverride {
                            name: name.clone(),
                            partial: *partial,
                        });
                }
                MemberTag::PrimaryKey { order } => {
                    if !self.primary_keys.iter().any(|(p, _, _)| p == path) {
                        self.primary_keys.push((path.to_string(), *order, self.pk_seq));
                        self.pk_seq += 1;
                    }
                }
                MemberTag::ForeignKey { targets } => {
                    self.fk_targets
                        .entry(path.to_string())
                        .or_insert_with(|| targets.clone());
                }
                MemberTag::Metadata { key, value } => {
                    if let Some(level) = self.member_meta_levels.last_mut() {
                        level
                            .entry(path.to_string())
                            .or_default()
                            .insert(key.clone(), value.clone());
                    }
                }
                MemberTag::Ignore => (),
            }
        }
    }

    fn is_ignored(&self, path: &str) -> bool {
        self.ignored
            .iter()
            .any(|ignored| path == ignored || path.starts_with(&format!("{ignored}.")))
    }

    /// A navigation member maps to foreign key columns against the
    /// referenced type's primary key: one derived column for a sole key,
    /// one explicitly targeted column per key member for a composite one.
    fn resolve_navigation(&mut self, path: &str, target: TypeRef) -> crate::Result<()> {
        let targets = self.fk_targets.get(path).cloned().unwrap_or_default();
        let target_keys = primary_key_members(target)?;

        if targets.is_empty() {
            return match target_keys.len() {
                0 => Err(invalid_configuration(format!(
                    "`{}` declares no primary key to reference",
                    target.name()
                ))),
                1 => {
                    let full = format!("{path}.{}", target_keys[0]);
                    self.push_column(&full);
                    self.foreign_keys.push(full);
                    Ok(())
                }
                _ => Err(invalid_configuration(format!(
                    "`{}` has a composite primary key; declare one foreign key target per key member",
                    target.name()
                ))),
            };
        }

        if target_keys.len() > 1 && targets.len() != target_keys.len() {
            return Err(invalid_configuration(format!(
                "`{}` has {} primary key members but {} foreign key target(s) were declared",
                target.name(),
                target_keys.len(),
                targets.len()
            )));
        }

        for fk_target in targets {
            if fk_target.target_property.is_empty() {
                return Err(invalid_configuration(
                    "a foreign key target property cannot be empty",
                ));
            }

            if !target_keys.contains(&fk_target.target_property) {
                return Err(invalid_configuration(format!(
                    "`{}` is not a primary key member of `{}`",
                    fk_target.target_property,
                    target.name()
                )));
            }

            let full = format!("{path}.{}", fk_target.target_property);

            if let Some(column) = fk_target.column_name {
                self.overrides
                    .entry(full.clone())
                    .or_insert(NameOverride {
                        name: column,
                        partial: false,
                    });
            }

            self.push_column(&full);
            self.foreign_keys.push(full);
        }

        Ok(())
    }

    fn push_column(&mut self, path: &str) {
        let name = self.compute_name(path);
        self.columns.push(path.to_string());
        self.names.insert(path.to_string(), name);
    }

    /// The SQL name of a path: the concatenation of its segments, each
    /// segment's contribution replaceable by a partial override, the
    /// whole accumulated name replaceable by a non-partial one. Deeper
    /// overrides apply later, so the one closest to the leaf wins.
    fn compute_name(&self, path: &str) -> String {
        let mut accumulated = String::new();
        let mut walked = String::new();

        for segment in path.split('.') {
            if !walked.is_empty() {
                walked.push('.');
            }

            walked.push_str(segment);

            match self.overrides.get(&walked) {
                Some(name_override) if !name_override.partial => {
                    accumulated.clear();
                    accumulated.push_str(&name_override.name);
                }
                Some(name_override) => accumulated.push_str(&name_override.name),
                None => accumulated.push_str(segment),
            }
        }

        accumulated
    }

    fn apply_member_metadata_ops(&mut self, config: &TableConfig) {
        let Some(leaf) = self.member_meta_levels.last_mut() else {
            return;
        };

        for (path, key, op) in config.member_metadata.iter() {
            match op {
                MetadataOp::Set(value) => {
                    leaf.entry(path.clone())
                        .or_default()
                        .insert(key.clone(), value.clone());
                }
                MetadataOp::Remove => {
                    if let Some(entries) = leaf.get_mut(path) {
                        entries.shift_remove(key);
                    }
                }
            }
        }
    }

    fn merge_member_metadata(
        &self,
        policy: &MetadataPolicy,
    ) -> IndexMap<String, IndexMap<String, serde_json::Value>> {
        let mut merged = IndexMap::new();

        for level in self.member_meta_levels.iter() {
            for path in level.keys() {
                if merged.contains_key(path) {
                    continue;
                }

                let path_levels: Vec<IndexMap<String, serde_json::Value>> = self
                    .member_meta_levels
                    .iter()
                    .filter_map(|l| l.get(path).cloned())
                    .collect();

                let entries = merge_levels(&path_levels, policy);

                if !entries.is_empty() {
                    merged.insert(path.clone(), entries);
                }
            }
        }

        merged
    }
}

/// The primary key member names of a referenced type, in composite order,
/// gathered over its whole base chain.
fn primary_key_members(ty: TypeRef) -> crate::Result<Vec<String>> {
    let ancestry = ancestry(ty)?;
    let mut keys: Vec<(String, Option<u32>, usize)> = Vec::new();
    let mut seq = 0;

    let mut push = |keys: &mut Vec<(String, Option<u32>, usize)>, name: String, order| {
        if !keys.iter().any(|(n, _, _)| *n == name) {
            keys.push((name, order, seq));
            seq += 1;
        }
    };

    for (path, order) in (ty.config)().primary_keys {
        push(&mut keys, path, order);
    }

    for (_, descriptor) in ancestry.iter() {
        for member in descriptor.members.iter() {
            for tag in member.tags.iter() {
                if let MemberTag::PrimaryKey { order } = tag {
                    push(&mut keys, member.name.clone(), *order);
                }
            }
        }
    }

    keys.sort_by_key(|(_, order, seq)| (order.map(u64::from).unwrap_or(*seq as u64), *seq));

    Ok(keys.into_iter().map(|(name, _, _)| name).collect())
}
