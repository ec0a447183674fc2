use crate::engine::{Engine, FunctionRegistry, NameCase, OperatorRegistry};

impl Engine {
    /// An engine with ANSI-flavored defaults: double-quoted identifiers,
    /// named `@p` parameters and no translation overrides.
    pub fn generic() -> Self {
        Engine {
            name: "generic".into(),
            escape_start: '"',
            escape_end: '"',
            parameter_prefix: "@p".into(),
            positional_parameters: false,
            name_case: NameCase::AsGiven,
            with_recursive_keyword: true,
            operators: OperatorRegistry::default(),
            functions: FunctionRegistry::default(),
        }
    }

    /// A MySQL-flavored engine: backtick-quoted identifiers, positional
    /// placeholders, `CONCAT(...)` instead of `||` and `INSERT IGNORE`
    /// for conflict-ignoring inserts.
    pub fn mysql() -> Self {
        let mut operators = OperatorRegistry::default();
        operators.add("concat", "CONCAT", true);
        operators.add("insert_ignore", "INSERT IGNORE", false);

        let mut functions = FunctionRegistry::default();
        functions.add("identity", "LAST_INSERT_ID");

        Engine {
            name: "mysql".into(),
            escape_start: '`',
            escape_end: '`',
            positional_parameters: true,
            operators,
            functions,
            ..Engine::generic()
        }
    }

    /// An Oracle-flavored engine: `:p` parameter names, uppercased
    /// identifiers and the shortened `CEIL`/`SUBSTR` function names. The
    /// `RECURSIVE` keyword is never rendered, and the identity value of
    /// the last insert is not retrievable.
    pub fn oracle() -> Self {
        let mut functions = FunctionRegistry::default();
        functions.add("ceiling", "CEIL");
        functions.add("substring", "SUBSTR");

        Engine {
            name: "oracle".into(),
            parameter_prefix: ":p".into(),
            name_case: NameCase::Upper,
            with_recursive_keyword: false,
            functions,
            ..Engine::generic()
        }
    }

    /// A SQLite-flavored engine: positional placeholders, `SUBSTR`,
    /// `last_insert_rowid()` for the identity value and
    /// `INSERT OR IGNORE` for conflict-ignoring inserts.
    pub fn sqlite() -> Self {
        let mut operators = OperatorRegistry::default();
        operators.add("insert_ignore", "INSERT OR IGNORE", false);

        let mut functions = FunctionRegistry::default();
        functions.add("substring", "SUBSTR");
        functions.add("identity", "last_insert_rowid");

        Engine {
            name: "sqlite".into(),
            positional_parameters: true,
            operators,
            functions,
            ..Engine::generic()
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::engine::Engine;

    #[test]
    fn the_default_engine_is_the_generic_one() {
        assert_eq!("generic", Engine::default().name);
    }

    #[test]
    fn mysql_quotes_with_backticks_and_renders_positional_placeholders() {
        let query = Select::from_table("users").so_that("name".equals("Musti"));
        let compiled = Engine::mysql().compile(query).unwrap();

        assert_eq!("SELECT * FROM `users` WHERE `name` = ?", compiled.sql);
        assert_eq!(Some("Musti"), compiled.parameters["@p0"].as_str());
    }

    #[test]
    fn concat_is_infix_on_generic_and_a_function_on_mysql() {
        let exprs: Vec<Expression> = vec![Column::from("first").into(), Column::from("last").into()];
        let query = Select::from_table("users").value(concat(exprs));

        let generic = Engine::generic().compile(query.clone()).unwrap();
        let mysql = Engine::mysql().compile(query).unwrap();

        assert_eq!(r#"SELECT "first" || "last" FROM "users""#, generic.sql);
        assert_eq!("SELECT CONCAT(`first`, `last`) FROM `users`", mysql.sql);
    }

    #[test]
    fn oracle_uppercases_identifiers_and_prefixes_parameters_with_a_colon() {
        let query = Select::from_table("users").so_that("name".equals("Musti"));
        let compiled = Engine::oracle().compile(query).unwrap();

        assert_eq!(r#"SELECT * FROM "USERS" WHERE "NAME" = :p0"#, compiled.sql);
    }

    #[test]
    fn oracle_shortens_substring_and_ceiling() {
        let query = Select::from_table("users")
            .value(substring(Column::from("name"), 1, Some(3)))
            .value(ceiling(Column::from("score")));

        let compiled = Engine::oracle().compile(query).unwrap();

        assert_eq!(
            r#"SELECT SUBSTR("NAME", :p0, :p1), CEIL("SCORE") FROM "USERS""#,
            compiled.sql
        );
    }

    #[test]
    fn oracle_never_renders_the_recursive_keyword() {
        let base = Select::from_table("categories").so_that("parent_id".is_null());
        let cte = base.into_cte("roots");
        let query = Select::from_table("roots").with_block(With::new().recursive().cte(cte));

        let compiled = Engine::oracle().compile(query.clone()).unwrap();
        assert!(compiled.sql.starts_with(r#"WITH "ROOTS" AS"#));

        let generic = Engine::generic().compile(query).unwrap();
        assert!(generic.sql.starts_with("WITH RECURSIVE "));
    }

    #[test]
    fn the_identity_function_compiles_only_where_the_dialect_can_retrieve_it() {
        let query = Select::default().value(identity());

        let mysql = Engine::mysql().compile(query.clone()).unwrap();
        assert_eq!("SELECT LAST_INSERT_ID()", mysql.sql);

        let sqlite = Engine::sqlite().compile(query.clone()).unwrap();
        assert_eq!("SELECT last_insert_rowid()", sqlite.sql);

        let err = Engine::generic().compile(query.clone()).unwrap_err();
        assert!(err.is_clause_not_supported());
        assert!(err.is_compile_error());

        let err = Engine::oracle().compile(query).unwrap_err();
        assert!(err.is_clause_not_supported());
    }

    #[test]
    fn conflict_ignoring_inserts_translate_per_dialect() {
        let insert = Insert::new()
            .into("users")
            .column("name")
            .push_values(vec!["Musti"])
            .on_conflict(OnConflict::DoNothing);

        let mysql = Engine::mysql().compile(insert.clone()).unwrap();
        assert_eq!("INSERT IGNORE INTO `users` (`name`) VALUES (?)", mysql.sql);

        let sqlite = Engine::sqlite().compile(insert.clone()).unwrap();
        assert_eq!(
            "INSERT OR IGNORE INTO \"users\" (\"name\") VALUES (?)",
            sqlite.sql
        );

        let err = Engine::generic().compile(insert).unwrap_err();
        assert!(err.is_clause_not_supported());
    }

    #[test]
    fn positional_engines_keep_named_keys_in_the_parameter_map() {
        let query = Select::from_table("users").so_that("id".equals(1).and("age".greater_than(2)));
        let compiled = Engine::sqlite().compile(query).unwrap();

        assert_eq!(
            "SELECT * FROM \"users\" WHERE \"id\" = ? AND \"age\" > ?",
            compiled.sql
        );

        let keys: Vec<&str> = compiled.parameters.keys().map(|k| k.as_str()).collect();
        assert_eq!(vec!["@p0", "@p1"], keys);
    }

    #[test]
    fn escaping_is_idempotent_per_dialect() {
        for engine in [
            Engine::generic(),
            Engine::mysql(),
            Engine::oracle(),
            Engine::sqlite(),
        ] {
            let once = engine.escape("crm.users");
            assert_eq!(once, engine.escape(&once), "engine: {}", engine.name);
        }
    }

    #[test]
    fn a_preset_stays_adjustable() {
        let mut engine = Engine::generic();
        engine.parameter_prefix = ":v".into();
        engine.functions.add("round", "BANKERS_ROUND");

        let query = Select::from_table("users").value(round(Column::from("score")));
        let compiled = engine.compile(query).unwrap();

        assert_eq!(r#"SELECT BANKERS_ROUND("score") FROM "users""#, compiled.sql);
        assert!(compiled.parameters.is_empty());

        let query = Select::from_table("users").so_that("id".equals(1));
        let compiled = engine.compile(query).unwrap();
        assert!(compiled.parameters.contains_key(":v0"));
    }
}
