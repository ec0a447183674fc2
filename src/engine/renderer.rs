use crate::ast::*;
use crate::engine::{
    registry::{default_function, default_operator, OperatorInfo},
    Engine,
};
use crate::error::{Error, ErrorKind};
use indexmap::IndexMap;
use std::fmt::Write;

/// Walks the fragment tree and renders it into query text, extracting
/// every [`Value`] it meets into the ordered parameter map. The walk
/// consumes the tree; [`validate`] runs first so rendering never has to
/// back out of partially written text.
pub(crate) struct Renderer<'a, 'b> {
    engine: &'b Engine,
    sql: String,
    parameters: IndexMap<String, Value<'a>>,
}

impl<'a, 'b> Renderer<'a, 'b> {
    pub(crate) fn render(
        engine: &'b Engine,
        query: Query<'a>,
    ) -> crate::Result<(String, IndexMap<String, Value<'a>>)> {
        validate(&query)?;

        let mut renderer = Renderer {
            engine,
            sql: String::with_capacity(4096),
            parameters: IndexMap::new(),
        };

        renderer.visit_query(query)?;

        Ok((renderer.sql, renderer.parameters))
    }

    fn write(&mut self, s: &str) -> crate::Result<()> {
        self.sql.write_str(s)?;
        Ok(())
    }

    fn visit_query(&mut self, query: Query<'a>) -> crate::Result<()> {
        match query {
            Query::Select(select) => self.visit_select(*select),
            Query::Insert(insert) => self.visit_insert(*insert),
            Query::Update(update) => self.visit_update(*update),
            Query::Delete(delete) => self.visit_delete(*delete),
            Query::SetOperation(op) => self.visit_set_operation(*op),
            Query::Raw(raw) => self.visit_raw_sql(raw),
        }
    }

    fn visit_select(&mut self, select: Select<'a>) -> crate::Result<()> {
        if let Some(with) = select.with {
            self.visit_with(with)?;
        }

        self.write("SELECT")?;

        if select.distinct {
            self.write(" DISTINCT")?;
        }

        if let Some(top) = select.top {
            self.write(" ")?;
            self.visit_top(top)?;
        }

        match select.columns {
            Some(columns) => {
                self.write(" ")?;

                for (i, column) in columns.into_iter().enumerate() {
                    if i > 0 {
                        self.write(", ")?;
                    }

                    self.visit_expression(column)?;
                }
            }
            None => self.write(" *")?,
        }

        if let Some(table) = select.table {
            self.write(" FROM ")?;
            self.visit_table(table, true)?;
        }

        for join in select.joins {
            match join {
                Join::Inner(data) => {
                    self.write(" INNER JOIN ")?;
                    self.visit_join_data(data)?;
                }
                Join::Left(data) => {
                    self.write(" LEFT JOIN ")?;
                    self.visit_join_data(data)?;
                }
                Join::Right(data) => {
                    self.write(" RIGHT JOIN ")?;
                    self.visit_join_data(data)?;
                }
                Join::Full(data) => {
                    self.write(" FULL JOIN ")?;
                    self.visit_join_data(data)?;
                }
            }
        }

        if let Some(conditions) = select.conditions {
            self.write(" WHERE ")?;
            self.visit_expression(conditions)?;
        }

        if !select.grouping.is_empty() {
            self.write(" GROUP BY ")?;

            for (i, column) in select.grouping.into_iter().enumerate() {
                if i > 0 {
                    self.write(", ")?;
                }

                self.visit_column(column)?;
            }
        }

        if !select.ordering.is_empty() {
            self.write(" ORDER BY ")?;
            self.visit_ordering(select.ordering)?;
        }

        self.visit_offset_fetch(select.offset, select.fetch)?;

        Ok(())
    }

    fn visit_insert(&mut self, insert: Insert<'a>) -> crate::Result<()> {
        match insert.on_conflict {
            Some(OnConflict::DoNothing) => {
                // Dialects describe conflict-ignoring inserts with their own
                // leading keyword, stored as the `insert_ignore` operator.
                let keyword = self
                    .engine
                    .operators
                    .get("insert_ignore")
                    .map(|info| info.token.to_string())
                    .ok_or_else(|| {
                        Error::builder(ErrorKind::clause_not_supported(
                            "ignoring conflicting rows on insert",
                        ))
                        .build()
                    })?;

                self.write(&keyword)?;
            }
            None => self.write("INSERT")?,
        }

        self.write(" INTO ")?;

        if let Some(table) = insert.table {
            self.visit_table(table, false)?;
        }

        self.write(" (")?;

        for (i, column) in insert.columns.into_iter().enumerate() {
            if i > 0 {
                self.write(", ")?;
            }

            let escaped = self.engine.escape(column.name.as_ref());
            self.write(&escaped)?;
        }

        self.write(") VALUES ")?;

        for (i, row) in insert.values.into_iter().enumerate() {
            if i > 0 {
                self.write(", ")?;
            }

            self.visit_row(row)?;
        }

        Ok(())
    }

    fn visit_update(&mut self, update: Update<'a>) -> crate::Result<()> {
        self.write("UPDATE ")?;

        if let Some(table) = update.table {
            self.visit_table(table, false)?;
        }

        self.write(" SET ")?;

        let assignments = update.columns.into_iter().zip(update.values);

        for (i, (column, value)) in assignments.enumerate() {
            if i > 0 {
                self.write(", ")?;
            }

            let escaped = self.engine.escape(column.name.as_ref());
            self.write(&escaped)?;
            self.write(" = ")?;
            self.visit_expression(value)?;
        }

        if let Some(conditions) = update.conditions {
            self.write(" WHERE ")?;
            self.visit_expression(conditions)?;
        }

        Ok(())
    }

    fn visit_delete(&mut self, delete: Delete<'a>) -> crate::Result<()> {
        self.write("DELETE FROM ")?;

        for (i, table) in delete.tables.into_iter().enumerate() {
            if i > 0 {
                self.write(", ")?;
            }

            self.visit_table(table, true)?;
        }

        if let Some(conditions) = delete.conditions {
            self.write(" WHERE ")?;
            self.visit_expression(conditions)?;
        }

        Ok(())
    }

    fn visit_set_operation(&mut self, op: SetOperation<'a>) -> crate::Result<()> {
        self.visit_select(*op.first)?;

        for (operator, select) in op.rest {
            write!(self.sql, " {operator} ")?;
            self.visit_select(select)?;
        }

        Ok(())
    }

    fn visit_with(&mut self, with: With<'a>) -> crate::Result<()> {
        self.write("WITH ")?;

        if with.recursive && self.engine.with_recursive_keyword {
            self.write("RECURSIVE ")?;
        }

        for (i, cte) in with.ctes.into_iter().enumerate() {
            if i > 0 {
                self.write(", ")?;
            }

            let escaped = self.engine.escape(cte.identifier.as_ref());
            self.write(&escaped)?;

            if !cte.columns.is_empty() {
                self.write(" (")?;

                for (j, column) in cte.columns.into_iter().enumerate() {
                    if j > 0 {
                        self.write(", ")?;
                    }

                    let escaped = self.engine.escape(column.as_ref());
                    self.write(&escaped)?;
                }

                self.write(")")?;
            }

            self.write(" AS (")?;
            self.visit_query(*cte.selection)?;
            self.write(")")?;
        }

        self.write(" ")?;

        Ok(())
    }

    fn visit_expression(&mut self, expr: Expression<'a>) -> crate::Result<()> {
        match expr {
            Expression::Value(value) => self.visit_parameterized(value),
            Expression::Raw(raw) => self.visit_raw_value(raw.0),
            Expression::Column(column) => self.visit_column(column),
            Expression::Row(row) => self.visit_row(row),
            Expression::Function(function) => self.visit_function(function),
            Expression::Operator(operator) => self.visit_operator(operator),
            Expression::RawSql(raw) => self.visit_raw_sql(raw),
            Expression::Select(select) => {
                self.write("(")?;
                self.visit_select(*select)?;
                self.write(")")
            }
        }
    }

    /// Extracts the value into the parameter map and writes its
    /// placeholder. The key is always the prefixed ordinal; positional
    /// engines render an anonymous `?` in the text instead of the key.
    fn visit_parameterized(&mut self, value: Value<'a>) -> crate::Result<()> {
        let name = format!("{}{}", self.engine.parameter_prefix, self.parameters.len());

        if self.engine.positional_parameters {
            self.write("?")?;
        } else {
            self.write(&name)?;
        }

        self.parameters.insert(name, value);

        Ok(())
    }

    fn visit_column(&mut self, mut column: Column<'a>) -> crate::Result<()> {
        if let Some(table) = column.table.take() {
            match table.alias {
                Some(alias) => {
                    let escaped = self.engine.escape(alias.as_ref());
                    self.write(&escaped)?;
                    self.write(".")?;
                }
                // A sub-query source has no name of its own; without an
                // alias the column renders unqualified.
                None => {
                    if let TableType::Table(name) = table.typ {
                        if let Some(schema) = table.schema {
                            let escaped = self.engine.escape(schema.as_ref());
                            self.write(&escaped)?;
                            self.write(".")?;
                        }

                        let escaped = self.engine.escape(name.as_ref());
                        self.write(&escaped)?;
                        self.write(".")?;
                    }
                }
            }
        }

        if column.is_wildcard() {
            self.write("*")?;
        } else {
            let escaped = self.engine.escape(column.name.as_ref());
            self.write(&escaped)?;
        }

        if let Some(alias) = column.alias {
            self.write(" AS ")?;
            let escaped = self.engine.escape(alias.as_ref());
            self.write(&escaped)?;
        }

        Ok(())
    }

    fn visit_row(&mut self, row: Row<'a>) -> crate::Result<()> {
        self.write("(")?;

        for (i, value) in row.into_iter().enumerate() {
            if i > 0 {
                self.write(", ")?;
            }

            self.visit_expression(value)?;
        }

        self.write(")")
    }

    fn visit_function(&mut self, function: Function<'a>) -> crate::Result<()> {
        let info = self
            .engine
            .functions
            .get(function.key.as_ref())
            .cloned()
            .or_else(|| default_function(function.key.as_ref()))
            .ok_or_else(|| {
                Error::builder(ErrorKind::clause_not_supported(format!(
                    "the `{}` function",
                    function.key
                )))
                .build()
            })?;

        self.write(info.name.as_ref())?;
        self.write("(")?;

        for (i, arg) in function.args.into_iter().enumerate() {
            if i > 0 {
                self.write(", ")?;
            }

            self.visit_expression(arg)?;
        }

        self.write(")")
    }

    fn visit_operator(&mut self, operator: Operator<'a>) -> crate::Result<()> {
        let info = self
            .engine
            .operators
            .get(operator.key.as_ref())
            .cloned()
            .or_else(|| default_operator(operator.key.as_ref()))
            .ok_or_else(|| {
                Error::builder(ErrorKind::clause_not_supported(format!(
                    "the `{}` operator",
                    operator.key
                )))
                .build()
            })?;

        if info.is_function {
            return self.visit_operator_as_function(info, operator.operands);
        }

        match operator.operands {
            Operands::Nary(operands) => {
                let parent_key = operator.key;

                for (i, operand) in operands.into_iter().enumerate() {
                    if i > 0 {
                        write!(self.sql, " {} ", info.token)?;
                    }

                    self.visit_infix_operand(operand, parent_key.as_ref())?;
                }

                Ok(())
            }
            Operands::Binary { left, right } => {
                self.visit_infix_operand(*left, operator.key.as_ref())?;
                write!(self.sql, " {} ", info.token)?;
                self.visit_infix_operand(*right, operator.key.as_ref())
            }
            Operands::Unary { operand, postfix } => {
                if postfix {
                    self.visit_expression(*operand)?;
                    write!(self.sql, " {}", info.token)?;
                } else {
                    write!(self.sql, "{} (", info.token)?;
                    self.visit_expression(*operand)?;
                    self.write(")")?;
                }

                Ok(())
            }
        }
    }

    fn visit_operator_as_function(
        &mut self,
        info: OperatorInfo,
        operands: Operands<'a>,
    ) -> crate::Result<()> {
        self.write(info.token.as_ref())?;
        self.write("(")?;

        let operands = match operands {
            Operands::Nary(operands) => operands,
            Operands::Binary { left, right } => vec![*left, *right],
            Operands::Unary { operand, .. } => vec![*operand],
        };

        for (i, operand) in operands.into_iter().enumerate() {
            if i > 0 {
                self.write(", ")?;
            }

            self.visit_expression(operand)?;
        }

        self.write(")")
    }

    /// A nested infix operator is wrapped in parentheses when its key
    /// differs from the surrounding one and it does not bind strictly
    /// tighter, so mixed `AND`/`OR` chains and nested arithmetic keep
    /// their shape.
    fn visit_infix_operand(&mut self, expr: Expression<'a>, parent_key: &str) -> crate::Result<()> {
        let needs_parens = match expr.infix_key() {
            Some(key) if key.eq_ignore_ascii_case(parent_key) => false,
            Some(key) => !binds_tighter(key, parent_key),
            None => false,
        };

        if needs_parens {
            self.write("(")?;
            self.visit_expression(expr)?;
            self.write(")")
        } else {
            self.visit_expression(expr)
        }
    }

    fn visit_raw_sql(&mut self, raw: RawSql<'a>) -> crate::Result<()> {
        for segment in raw.segments.iter() {
            match segment {
                Segment::Text(text) => self.write(text)?,
                // An index can be referenced more than once; validated
                // in-range when the template was parsed.
                Segment::Arg(i) => self.visit_expression(raw.args[*i].clone())?,
            }
        }

        Ok(())
    }

    /// Writes a value into the text as a literal instead of extracting it
    /// into the parameter map.
    fn visit_raw_value(&mut self, value: Value<'a>) -> crate::Result<()> {
        if value.is_null() {
            return self.write("NULL");
        }

        match value {
            Value::Integer(Some(i)) => write!(self.sql, "{i}")?,
            Value::Real(Some(d)) => write!(self.sql, "{d}")?,
            Value::Text(Some(t)) => write!(self.sql, "'{}'", t.replace('\'', "''"))?,
            Value::Char(Some('\'')) => self.write("''''")?,
            Value::Char(Some(c)) => write!(self.sql, "'{c}'")?,
            Value::Bytes(Some(b)) => {
                self.write("x'")?;

                for byte in b.iter() {
                    write!(self.sql, "{byte:02x}")?;
                }

                self.write("'")?;
            }
            Value::Boolean(Some(b)) => write!(self.sql, "{b}")?,
            Value::Json(Some(j)) => write!(self.sql, "'{}'", j.to_string().replace('\'', "''"))?,
            #[cfg(feature = "uuid")]
            Value::Uuid(Some(u)) => write!(self.sql, "'{u}'")?,
            #[cfg(feature = "chrono")]
            Value::DateTime(Some(dt)) => write!(self.sql, "'{}'", dt.to_rfc3339())?,
            #[cfg(feature = "chrono")]
            Value::Date(Some(d)) => write!(self.sql, "'{d}'")?,
            #[cfg(feature = "chrono")]
            Value::Time(Some(t)) => write!(self.sql, "'{t}'")?,
            _ => (),
        }

        Ok(())
    }

    fn visit_table(&mut self, table: Table<'a>, include_alias: bool) -> crate::Result<()> {
        if let Some(schema) = table.schema {
            let escaped = self.engine.escape(schema.as_ref());
            self.write(&escaped)?;
            self.write(".")?;
        }

        match table.typ {
            TableType::Table(name) => {
                let escaped = self.engine.escape(name.as_ref());
                self.write(&escaped)?;
            }
            TableType::Query(select) => {
                self.write("(")?;
                self.visit_select(*select)?;
                self.write(")")?;
            }
            TableType::Raw(raw) => {
                self.write("(")?;
                self.visit_raw_sql(raw)?;
                self.write(")")?;
            }
        }

        if include_alias {
            if let Some(alias) = table.alias {
                self.write(" AS ")?;
                let escaped = self.engine.escape(alias.as_ref());
                self.write(&escaped)?;
            }
        }

        Ok(())
    }

    fn visit_join_data(&mut self, data: JoinData<'a>) -> crate::Result<()> {
        self.visit_table(data.table, true)?;
        self.write(" ON ")?;
        self.visit_expression(data.conditions)
    }

    fn visit_ordering(&mut self, ordering: Ordering<'a>) -> crate::Result<()> {
        for (i, definition) in ordering.0.into_iter().enumerate() {
            if i > 0 {
                self.write(", ")?;
            }

            self.visit_expression(definition.value)?;

            match definition.order {
                Some(Order::Asc) => self.write(" ASC")?,
                Some(Order::Desc) => self.write(" DESC")?,
                None => (),
            }
        }

        Ok(())
    }

    fn visit_top(&mut self, top: Top<'a>) -> crate::Result<()> {
        self.write("TOP (")?;

        match top.value {
            TopValue::Count(count) => self.visit_parameterized(Value::integer(count))?,
            TopValue::Raw(raw) => self.visit_raw_sql(raw)?,
        }

        self.write(")")?;

        if top.percent {
            self.write(" PERCENT")?;
        }

        if top.with_ties {
            self.write(" WITH TIES")?;
        }

        Ok(())
    }

    /// Offset and fetch compose into one trailing clause, offset first. A
    /// fetch without an offset gets an offset of zero.
    fn visit_offset_fetch(&mut self, offset: Option<u64>, fetch: Option<u64>) -> crate::Result<()> {
        if offset.is_none() && fetch.is_none() {
            return Ok(());
        }

        let offset = row_count(offset.unwrap_or(0))?;

        self.write(" OFFSET ")?;
        self.visit_parameterized(Value::integer(offset))?;
        self.write(" ROWS")?;

        if let Some(fetch) = fetch {
            let fetch = row_count(fetch)?;

            self.write(" FETCH NEXT ")?;
            self.visit_parameterized(Value::integer(fetch))?;
            self.write(" ROWS ONLY")?;
        }

        Ok(())
    }
}

fn row_count(count: u64) -> crate::Result<i64> {
    i64::try_from(count)
        .map_err(|_| Error::builder(ErrorKind::compile("row count out of range")).build())
}

/// `true` when a nested operator with the given key binds strictly tighter
/// than the surrounding one and renders without parentheses. Unknown keys
/// have no known binding strength and are always parenthesized.
fn binds_tighter(child: &str, parent: &str) -> bool {
    match (binding_strength(child), binding_strength(parent)) {
        (Some(child), Some(parent)) => child > parent,
        _ => false,
    }
}

fn binding_strength(key: &str) -> Option<u8> {
    let key = key.to_ascii_lowercase();

    match key.as_str() {
        "or" | "and" => Some(1),
        "eq" | "ne" | "lt" | "lte" | "gt" | "gte" | "like" | "notlike" | "in" | "notin" => Some(2),
        "add" | "subtract" | "concat" => Some(3),
        "multiply" | "divide" | "modulo" => Some(4),
        _ => None,
    }
}

fn compile_error(msg: &'static str) -> Error {
    Error::builder(ErrorKind::compile(msg)).build()
}

/// The borrowing pre-pass over the fragment tree: every malformed shape is
/// rejected here before a single character is rendered.
pub(crate) fn validate(query: &Query<'_>) -> crate::Result<()> {
    match query {
        Query::Select(select) => validate_select(select),
        Query::Insert(insert) => validate_insert(insert),
        Query::Update(update) => validate_update(update),
        Query::Delete(delete) => validate_delete(delete),
        Query::SetOperation(op) => {
            validate_select(&op.first)?;

            for (_, select) in op.rest.iter() {
                validate_select(select)?;
            }

            Ok(())
        }
        Query::Raw(raw) => validate_raw_sql(raw),
    }
}

fn validate_select(select: &Select<'_>) -> crate::Result<()> {
    if let Some(with) = select.with.as_ref() {
        validate_with(with)?;
    }

    if let Some(columns) = select.columns.as_ref() {
        if columns.is_empty() {
            return Err(compile_error(
                "an explicitly empty column list cannot be compiled",
            ));
        }

        for column in columns.iter() {
            validate_expression(column)?;
        }
    }

    if let Some(table) = select.table.as_ref() {
        validate_table(table)?;
    }

    for join in select.joins.iter() {
        let data = match join {
            Join::Inner(data) | Join::Left(data) | Join::Right(data) | Join::Full(data) => data,
        };

        validate_table(&data.table)?;
        validate_expression(&data.conditions)?;
    }

    if let Some(conditions) = select.conditions.as_ref() {
        validate_expression(conditions)?;
    }

    for definition in select.ordering.0.iter() {
        validate_expression(&definition.value)?;

        if definition.order.is_some() {
            if let Expression::Column(column) = &definition.value {
                if column.is_wildcard() || column.is_empty_name() {
                    let kind = ErrorKind::invalid_operation(
                        "an explicit ordering needs a named column",
                    );
                    return Err(Error::builder(kind).build());
                }
            }
        }
    }

    if let Some(Top {
        value: TopValue::Raw(raw),
        ..
    }) = select.top.as_ref()
    {
        validate_raw_sql(raw)?;
    }

    Ok(())
}

fn validate_insert(insert: &Insert<'_>) -> crate::Result<()> {
    if insert.table.is_none() {
        return Err(compile_error("INSERT requires a target table"));
    }

    if insert.columns.is_empty() {
        return Err(compile_error("INSERT requires at least one column"));
    }

    if insert.values.is_empty() {
        return Err(compile_error("INSERT requires at least one row of values"));
    }

    for row in insert.values.rows.iter() {
        if row.len() != insert.columns.len() {
            return Err(compile_error(
                "the width of an inserted row does not match the column list",
            ));
        }

        for value in row.values.iter() {
            validate_expression(value)?;
        }
    }

    Ok(())
}

fn validate_update(update: &Update<'_>) -> crate::Result<()> {
    if update.table.is_none() {
        return Err(compile_error("UPDATE requires a target table"));
    }

    if update.columns.is_empty() {
        return Err(compile_error("UPDATE requires at least one assignment"));
    }

    for value in update.values.iter() {
        validate_expression(value)?;
    }

    if let Some(conditions) = update.conditions.as_ref() {
        validate_expression(conditions)?;
    }

    Ok(())
}

fn validate_delete(delete: &Delete<'_>) -> crate::Result<()> {
    if delete.tables.is_empty() {
        return Err(compile_error("DELETE requires a target table"));
    }

    for table in delete.tables.iter() {
        validate_table(table)?;
    }

    if let Some(conditions) = delete.conditions.as_ref() {
        validate_expression(conditions)?;
    }

    Ok(())
}

fn validate_with(with: &With<'_>) -> crate::Result<()> {
    if with.is_empty() {
        return Err(compile_error("an empty WITH block cannot be compiled"));
    }

    for cte in with.ctes.iter() {
        validate(&cte.selection)?;
    }

    Ok(())
}

fn validate_table(table: &Table<'_>) -> crate::Result<()> {
    match &table.typ {
        TableType::Table(_) => Ok(()),
        TableType::Query(select) => validate_select(select),
        TableType::Raw(raw) => validate_raw_sql(raw),
    }
}

fn validate_raw_sql(raw: &RawSql<'_>) -> crate::Result<()> {
    for arg in raw.args.iter() {
        validate_expression(arg)?;
    }

    Ok(())
}

fn validate_expression(expr: &Expression<'_>) -> crate::Result<()> {
    match expr {
        Expression::Value(_) | Expression::Raw(_) | Expression::Column(_) => Ok(()),
        Expression::Row(row) => {
            if row.is_empty() {
                return Err(compile_error("a row must hold at least one value"));
            }

            for value in row.values.iter() {
                validate_expression(value)?;
            }

            Ok(())
        }
        Expression::Function(function) => {
            for arg in function.args.iter() {
                validate_expression(arg)?;
            }

            Ok(())
        }
        Expression::Operator(operator) => match &operator.operands {
            Operands::Nary(operands) => {
                if operands.is_empty() {
                    return Err(compile_error("an operator needs at least one operand"));
                }

                for operand in operands.iter() {
                    validate_expression(operand)?;
                }

                Ok(())
            }
            Operands::Binary { left, right } => {
                validate_expression(left)?;
                validate_expression(right)
            }
            Operands::Unary { operand, .. } => validate_expression(operand),
        },
        Expression::RawSql(raw) => validate_raw_sql(raw),
        Expression::Select(select) => validate_select(select),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(query: impl Into<Query<'static>>) -> crate::Result<crate::engine::Compiled<'static>> {
        Engine::generic().compile(query)
    }

    #[test]
    fn an_empty_and_list_does_not_compile() {
        let query = Select::from_table("users").so_that(Operator::and(Vec::new()));
        let err = compile(query).unwrap_err();

        assert!(err.is_compile_error());
        assert!(!err.is_clause_not_supported());
    }

    #[test]
    fn an_empty_in_row_does_not_compile() {
        let query = Select::from_table("users").so_that("id".in_selection(Row::new()));
        let err = compile(query).unwrap_err();

        assert!(err.is_compile_error());
    }

    #[test]
    fn an_explicitly_empty_column_list_does_not_compile() {
        let query = Select::from_table("users").columns(Vec::<Column>::new());
        let err = compile(query).unwrap_err();

        assert!(err.is_compile_error());
    }

    #[test]
    fn an_empty_with_block_does_not_compile() {
        let query = Select::from_table("users").with_block(With::new());
        let err = compile(query).unwrap_err();

        assert!(err.is_compile_error());
    }

    #[test]
    fn an_insert_without_a_table_does_not_compile() {
        let insert = Insert::new().column("name").push_values(vec!["Musti"]);
        let err = compile(insert).unwrap_err();

        assert!(err.is_compile_error());
    }

    #[test]
    fn a_mismatched_insert_row_width_does_not_compile() {
        let insert = Insert::new()
            .into("users")
            .columns(vec!["id", "name"])
            .push_values(vec!["Musti"]);

        let err = compile(insert).unwrap_err();
        assert!(err.is_compile_error());
    }

    #[test]
    fn an_update_without_assignments_does_not_compile() {
        let update = Update::table("users").so_that("id".equals(1));
        let err = compile(update).unwrap_err();

        assert!(err.is_compile_error());
    }

    #[test]
    fn ordering_a_wildcard_is_an_invalid_operation() {
        let query = Select::from_table("users").order_by(Column::wildcard().ascend());
        let err = compile(query).unwrap_err();

        assert!(err.is_invalid_operation());
    }

    #[test]
    fn a_nested_malformed_fragment_is_found_by_the_pre_pass() {
        let inner = Select::from_table("posts").so_that(Operator::or(Vec::new()));
        let query = Select::from_table(Table::from(inner).alias("p"));

        let err = compile(query).unwrap_err();
        assert!(err.is_compile_error());
    }

    #[test]
    fn mixed_logical_chains_are_parenthesized() {
        let conditions = "name"
            .equals("Musti")
            .or("age".less_than(10))
            .and("left".equals(true));

        let query = Select::from_table("cats").so_that(conditions);
        let compiled = compile(query).unwrap();

        assert_eq!(
            r#"SELECT * FROM "cats" WHERE ("name" = @p0 OR "age" < @p1) AND "left" = @p2"#,
            compiled.sql
        );
    }

    #[test]
    fn a_prefix_unary_operator_wraps_its_operand() {
        let query = Select::from_table("users").so_that(not("admin".equals(true)));
        let compiled = compile(query).unwrap();

        assert_eq!(
            r#"SELECT * FROM "users" WHERE NOT ("admin" = @p0)"#,
            compiled.sql
        );
    }

    #[test]
    fn a_postfix_unary_operator_follows_its_operand() {
        let query = Select::from_table("users").so_that("deleted_at".is_null());
        let compiled = compile(query).unwrap();

        assert_eq!(
            r#"SELECT * FROM "users" WHERE "deleted_at" IS NULL"#,
            compiled.sql
        );
    }

    #[test]
    fn raw_values_are_rendered_inline() {
        let query = Select::from_table("users").so_that("name".equals("Musti".raw()));
        let compiled = compile(query).unwrap();

        assert_eq!(
            r#"SELECT * FROM "users" WHERE "name" = 'Musti'"#,
            compiled.sql
        );
        assert!(compiled.parameters.is_empty());
    }

    #[test]
    fn raw_text_quotes_are_doubled() {
        let query = Select::from_table("users").so_that("name".equals("it's".raw()));
        let compiled = compile(query).unwrap();

        assert_eq!(
            r#"SELECT * FROM "users" WHERE "name" = 'it''s'"#,
            compiled.sql
        );
    }

    #[test]
    fn a_raw_template_renders_its_arguments_in_place() {
        let raw = RawSql::new(
            "json_extract({0}, '$.a') = {1}",
            vec![Expression::Column("meta".into()), 1.into()],
        )
        .unwrap();

        let query = Select::from_table("events").so_that(Expression::RawSql(raw));
        let compiled = compile(query).unwrap();

        assert_eq!(
            r#"SELECT * FROM "events" WHERE json_extract("meta", '$.a') = @p0"#,
            compiled.sql
        );
        assert_eq!(1, compiled.parameters.len());
    }

    #[test]
    fn offset_and_fetch_compose_into_a_single_clause() {
        let query = Select::from_table("users").fetch(10).offset(20);
        let compiled = compile(query).unwrap();

        assert_eq!(
            "SELECT * FROM \"users\" OFFSET @p0 ROWS FETCH NEXT @p1 ROWS ONLY",
            compiled.sql
        );
        assert_eq!(Some(20), compiled.parameters["@p0"].as_i64());
        assert_eq!(Some(10), compiled.parameters["@p1"].as_i64());
    }

    #[test]
    fn a_fetch_without_an_offset_defaults_the_offset_to_zero() {
        let query = Select::from_table("users").fetch(10);
        let compiled = compile(query).unwrap();

        assert_eq!(
            "SELECT * FROM \"users\" OFFSET @p0 ROWS FETCH NEXT @p1 ROWS ONLY",
            compiled.sql
        );
        assert_eq!(Some(0), compiled.parameters["@p0"].as_i64());
    }

    #[test]
    fn a_top_count_is_parameterized() {
        let query = Select::from_table("users").top(Top::count(5));
        let compiled = compile(query).unwrap();

        assert_eq!("SELECT TOP (@p0) * FROM \"users\"", compiled.sql);
        assert_eq!(Some(5), compiled.parameters["@p0"].as_i64());
    }

    #[test]
    fn a_with_block_precedes_the_select() {
        let cte = Select::from_table("payments")
            .column("user_id")
            .into_cte("paying")
            .column("user_id");

        let query = Select::from_table("paying").with(cte);
        let compiled = compile(query).unwrap();

        assert_eq!(
            r#"WITH "paying" ("user_id") AS (SELECT "user_id" FROM "payments") SELECT * FROM "paying""#,
            compiled.sql
        );
    }

    #[test]
    fn set_operations_chain_in_order() {
        let a = Select::from_table("a").column("id");
        let b = Select::from_table("b").column("id");
        let c = Select::from_table("c").column("id");

        let compiled = compile(a.union(b).except(c)).unwrap();

        assert_eq!(
            r#"SELECT "id" FROM "a" UNION SELECT "id" FROM "b" EXCEPT SELECT "id" FROM "c""#,
            compiled.sql
        );
    }

    #[test]
    fn joins_render_between_from_and_where() {
        let join = "posts".alias("p").on(("p", "user_id").equals(Column::from(("u", "id"))));
        let query = Select::from_table("users".alias("u"))
            .inner_join(join)
            .so_that(("u", "active").equals(true));

        let compiled = compile(query).unwrap();

        assert_eq!(
            r#"SELECT * FROM "users" AS "u" INNER JOIN "posts" AS "p" ON "p"."user_id" = "u"."id" WHERE "u"."active" = @p0"#,
            compiled.sql
        );
    }

    #[test]
    fn a_multi_row_insert_keeps_row_order() {
        let insert = Insert::new()
            .into("users")
            .columns(vec!["id", "name"])
            .push_values(vec![Expression::from(1), Expression::from("Musti")])
            .push_values(vec![Expression::from(2), Expression::from("Naukio")]);

        let compiled = compile(insert).unwrap();

        assert_eq!(
            r#"INSERT INTO "users" ("id", "name") VALUES (@p0, @p1), (@p2, @p3)"#,
            compiled.sql
        );
        assert_eq!(4, compiled.parameters.len());
    }

    #[test]
    fn delete_from_multiple_tables_lists_every_target() {
        let delete = Delete::from_table("users").and_from("profiles");
        let compiled = compile(delete).unwrap();

        assert_eq!(r#"DELETE FROM "users", "profiles""#, compiled.sql);
    }

    #[test]
    fn update_renders_assignments_and_conditions() {
        let update = Update::table("users")
            .set("name", "Naukio")
            .set("age", 5)
            .so_that("id".equals(1));

        let compiled = compile(update).unwrap();

        assert_eq!(
            r#"UPDATE "users" SET "name" = @p0, "age" = @p1 WHERE "id" = @p2"#,
            compiled.sql
        );
        assert_eq!(3, compiled.parameters.len());
    }

    #[test]
    fn an_aliased_wildcard_qualifies_the_star() {
        let users = "users".alias("u");
        let query = Select::from_table(users.clone()).column(Column::wildcard().table(users));

        let compiled = compile(query).unwrap();

        assert_eq!(r#"SELECT "u".* FROM "users" AS "u""#, compiled.sql);
    }

    #[test]
    fn nested_arithmetic_keeps_its_grouping() {
        let sum = Operator::binary("add", Column::from("a"), Column::from("b"));
        let product = Operator::binary("multiply", sum, Column::from("c"));

        let compiled = compile(Select::from_table("t").value(product)).unwrap();

        assert_eq!(r#"SELECT ("a" + "b") * "c" FROM "t""#, compiled.sql);
    }

    #[test]
    fn tighter_binding_operands_render_without_parentheses() {
        let product = Operator::binary("multiply", Column::from("a"), Column::from("b"));
        let sum = Operator::binary("add", product, Column::from("c"));

        let compiled = compile(Select::from_table("t").value(sum)).unwrap();

        assert_eq!(r#"SELECT "a" * "b" + "c" FROM "t""#, compiled.sql);
    }

    #[test]
    fn an_unknown_operator_key_is_always_parenthesized() {
        let inner = Operator::binary("bitand", Column::from("a"), Column::from("b"));
        let outer = Operator::binary("add", inner, Column::from("c"));

        let engine = {
            let mut engine = Engine::generic();
            engine.operators.add("bitand", "&", false);
            engine
        };

        let compiled = engine.compile(Select::from_table("t").value(outer)).unwrap();

        assert_eq!(r#"SELECT ("a" & "b") + "c" FROM "t""#, compiled.sql);
    }

    #[test]
    fn a_column_off_an_unaliased_sub_query_renders_unqualified() {
        let inner = Select::from_table("users").column("id");
        let column = Column::from("id").table(Table::from(inner.clone()));

        let compiled = compile(Select::from_table(inner).column(column)).unwrap();

        assert_eq!(
            r#"SELECT "id" FROM (SELECT "id" FROM "users")"#,
            compiled.sql
        );
    }
}
