use pretty_assertions::assert_eq;
use serde_json::json;
use sqlforge::{ast::*, engine::Engine, schema::*};

struct Address;

impl Describe for Address {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::new("Address")
            .embeddable()
            .member(MemberDescriptor::scalar("Street"))
            .member(MemberDescriptor::scalar("City"))
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

    fn table_config() -> TableConfig {
        TableConfig::new().table_name("people")
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

fn person_table(registry: &SchemaRegistry) -> Table<'static> {
    Table::for_type::<Person>(registry).unwrap().alias("person")
}

#[test]
fn abs_over_a_mapped_member_compiles_with_an_empty_parameter_map() {
    let mut registry = SchemaRegistry::new();
    registry.register::<Person>().unwrap();

    let person = person_table(&registry);
    let query = Select::from_table(person.clone()).value(abs(person.member("Salary").unwrap()));

    let compiled = Engine::generic().compile(query).unwrap();

    assert_eq!(
        r#"SELECT ABS("person"."Salary") FROM "people" AS "person""#,
        compiled.sql
    );
    assert!(compiled.parameters.is_empty());
}

#[test]
fn coalesce_with_a_literal_fallback_extracts_one_parameter() {
    let mut registry = SchemaRegistry::new();
    registry.register::<Person>().unwrap();

    let person = person_table(&registry);
    let name = person.member("Name").unwrap();
    let query = Select::from_table(person).value(name.coalesce("abcd"));

    let compiled = Engine::generic().compile(query).unwrap();

    assert_eq!(
        r#"SELECT COALESCE("person"."Name", @p0) FROM "people" AS "person""#,
        compiled.sql
    );
    assert_eq!(1, compiled.parameters.len());
    assert_eq!(Some("abcd"), compiled.parameters["@p0"].as_str());
}

#[test]
fn compiling_the_same_tree_twice_is_deterministic() {
    let query = Select::from_table("users")
        .column("id")
        .so_that("name".equals("Musti").and("age".greater_than(4)))
        .order_by("id".descend())
        .offset(10)
        .fetch(5);

    let engine = Engine::generic();
    let first = engine.compile(query.clone()).unwrap();
    let second = engine.compile(query).unwrap();

    assert_eq!(first.sql, second.sql);
    assert_eq!(first.parameters, second.parameters);
}

#[test]
fn every_named_placeholder_in_the_text_has_a_map_entry() {
    let query = Select::from_table("users")
        .so_that("a".equals(1).and("b".equals(2)).and("c".equals(3)))
        .offset(1)
        .fetch(2);

    let compiled = Engine::generic().compile(query).unwrap();

    for key in compiled.parameters.keys() {
        assert!(compiled.sql.contains(key.as_str()), "missing {key}");
    }

    let placeholders = compiled.sql.matches("@p").count();
    assert_eq!(placeholders, compiled.parameters.len());
}

#[test]
fn positional_placeholders_match_the_map_size() {
    let query = Select::from_table("users").so_that("a".equals(1).and("b".equals(2)));
    let compiled = Engine::sqlite().compile(query).unwrap();

    assert_eq!(
        compiled.sql.matches('?').count(),
        compiled.parameters.len()
    );
}

#[test]
fn empty_lists_are_rejected_for_every_list_bearing_fragment() {
    let engine = Engine::generic();

    let empty_and = Select::from_table("t").so_that(Operator::and(Vec::new()));
    assert!(engine.compile(empty_and).unwrap_err().is_compile_error());

    let empty_columns = Select::from_table("t").columns(Vec::<Column>::new());
    assert!(engine.compile(empty_columns).unwrap_err().is_compile_error());

    let empty_row = Select::from_table("t").so_that("id".in_selection(Row::new()));
    assert!(engine.compile(empty_row).unwrap_err().is_compile_error());

    let empty_with = Select::from_table("t").with_block(With::new());
    assert!(engine.compile(empty_with).unwrap_err().is_compile_error());

    let empty_values = Insert::new().into("t").column("a");
    assert!(engine.compile(empty_values).unwrap_err().is_compile_error());

    let empty_delete = Delete::default();
    assert!(engine.compile(empty_delete).unwrap_err().is_compile_error());
}

#[test]
fn a_dialect_swap_changes_the_text_but_not_the_parameter_values() {
    let exprs: Vec<Expression> = vec![Column::from("name").into(), "!".into()];
    let query = Select::from_table("users")
        .value(concat(exprs))
        .so_that("id".equals(1));

    let generic = Engine::generic().compile(query.clone()).unwrap();
    let mysql = Engine::mysql().compile(query).unwrap();

    assert_eq!(
        r#"SELECT "name" || @p0 FROM "users" WHERE "id" = @p1"#,
        generic.sql
    );
    assert_eq!(
        "SELECT CONCAT(`name`, ?) FROM `users` WHERE `id` = ?",
        mysql.sql
    );

    let generic_values: Vec<_> = generic.parameters.values().collect();
    let mysql_values: Vec<_> = mysql.parameters.values().collect();
    assert_eq!(generic_values, mysql_values);
}

#[test]
fn a_composite_foreign_key_round_trips_through_the_registry() {
    let mut registry = SchemaRegistry::new();
    let info = registry.register::<Shipment>().unwrap();

    assert_eq!(info.columns().len(), info.column_names().count());
    assert_eq!(2, info.foreign_keys().len());
    assert_eq!("Line.OrderId", info.foreign_keys()[0]);
    assert_eq!("Line.LineNumber", info.foreign_keys()[1]);

    for path in info.foreign_keys() {
        assert!(info.columns().contains(path));
        assert!(info.column_name(path).is_some());
    }

    for path in info.primary_keys() {
        assert!(info.columns().contains(path));
    }
}

#[test]
fn mapped_members_compile_through_their_overridden_names() {
    let mut registry = SchemaRegistry::new();
    registry
        .register_with::<Person>(TableConfig::new().column_name("Home.City", "Town"))
        .unwrap();

    let person = person_table(&registry);
    let city = person.member("Home.City").unwrap();
    let query = Select::from_table(person).column(city).so_that("Id".equals(1));

    let compiled = Engine::generic().compile(query).unwrap();

    assert_eq!(
        r#"SELECT "person"."HomeTown" FROM "people" AS "person" WHERE "Id" = @p0"#,
        compiled.sql
    );
}

#[test]
fn an_unmapped_member_path_is_an_invalid_configuration() {
    let mut registry = SchemaRegistry::new();
    registry.register::<Person>().unwrap();

    let person = person_table(&registry);
    let err = person.member("Nope").unwrap_err();

    assert!(err.is_invalid_configuration());
}

#[test]
fn escaping_is_idempotent() {
    let engine = Engine::generic();

    let once = engine.escape("crm.users");
    assert_eq!(r#""crm"."users""#, once);
    assert_eq!(once, engine.escape(&once));
}

#[test]
fn metadata_flows_into_the_resolved_record() {
    let mut registry = SchemaRegistry::new();
    let info = registry
        .register_with::<Person>(
            TableConfig::new()
                .table_metadata("owner", json!("crm"))
                .member_metadata("Salary", "sensitive", json!(true)),
        )
        .unwrap();

    assert_eq!(json!("crm"), info.table_metadata()["owner"]);
    assert_eq!(
        json!(true),
        info.member_metadata("Salary").unwrap()["sensitive"]
    );
}
