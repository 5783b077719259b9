#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::catalog::{MemberDescriptor, TypeDescriptor, ValueShape};
use crate::naming::PropertyForm;
use crate::settings::{SettingsStore, UnitKind};

fn member(declaring: &str, name: &str, shape: &str, nullable: bool) -> MemberDescriptor {
    MemberDescriptor {
        name: name.into(),
        shape: ValueShape::parse(shape),
        nullable,
        readable: true,
        writable: true,
        declaring_type: declaring.into(),
    }
}

fn customer() -> TypeDescriptor {
    TypeDescriptor {
        name: "Customer".into(),
        namespace: "Acme.Domain.Entities.Sales".into(),
        members: vec![
            member("Customer", "Id", "int", false),
            member("Customer", "Name", "string", false),
            member("Customer", "Orders", "list<Order>", true),
            member("Customer", "RowVersion", "binary", true),
        ],
        base_type: None,
        exported: true,
        is_abstract: false,
        is_nested: false,
        generic_args: vec![],
    }
}

#[test]
fn test_target_lang_follows_convention() {
    use crate::naming::convention;
    assert_eq!(TargetLang::of(convention(UnitKind::Logic)), TargetLang::CSharp);
    assert_eq!(TargetLang::of(convention(UnitKind::ClientApp)), TargetLang::TypeScript);
    assert_eq!(TargetLang::of(convention(UnitKind::Facade)), TargetLang::CSharp);
}

#[test]
fn test_cs_type_mapping() {
    assert_eq!(cs_type(&ValueShape::parse("string"), false), "string");
    assert_eq!(cs_type(&ValueShape::parse("int"), false), "int");
    assert_eq!(cs_type(&ValueShape::parse("int"), true), "int?");
    assert_eq!(cs_type(&ValueShape::parse("date"), false), "DateTime");
    assert_eq!(cs_type(&ValueShape::parse("guid"), true), "Guid?");
    assert_eq!(cs_type(&ValueShape::parse("binary"), true), "byte[]");
    assert_eq!(cs_type(&ValueShape::parse("list<Order>"), false), "List<Order>");
    assert_eq!(cs_type(&ValueShape::parse("enum<OrderState>"), true), "OrderState?");
    // Reference shapes never take the value-type annotation.
    assert_eq!(cs_type(&ValueShape::parse("Order"), true), "Order");
}

#[test]
fn test_ts_type_mapping() {
    assert_eq!(ts_type(&ValueShape::parse("string"), false), "string");
    assert_eq!(ts_type(&ValueShape::parse("int"), false), "number");
    assert_eq!(ts_type(&ValueShape::parse("bool"), false), "boolean");
    assert_eq!(ts_type(&ValueShape::parse("date"), false), "string");
    assert_eq!(ts_type(&ValueShape::parse("list<Order>"), false), "Order[]");
    assert_eq!(ts_type(&ValueShape::parse("Order"), true), "Order | null");
}

#[test]
fn test_default_values() {
    assert_eq!(
        cs_default(&ValueShape::parse("string"), false).as_deref(),
        Some("string.Empty")
    );
    assert_eq!(cs_default(&ValueShape::parse("string"), true), None);
    assert_eq!(
        cs_default(&ValueShape::parse("list<Order>"), false).as_deref(),
        Some("new List<Order>()")
    );
    // Nullable collections stay unset.
    assert_eq!(cs_default(&ValueShape::parse("list<Order>"), true), None);
    assert_eq!(cs_default(&ValueShape::parse("int"), false), None);

    assert_eq!(ts_default(&ValueShape::parse("int"), false).as_deref(), Some("0"));
    assert_eq!(ts_default(&ValueShape::parse("Order"), true).as_deref(), Some("null"));
    assert_eq!(ts_default(&ValueShape::parse("Order"), false), None);
}

#[test]
fn test_plain_property_forms() {
    let lines = plain_property_lines(
        &member("Customer", "Name", "string", false),
        TargetLang::CSharp,
    );
    assert_eq!(lines, vec!["public string Name { get; set; } = string.Empty;"]);

    let lines = plain_property_lines(
        &member("Customer", "Age", "int", true),
        TargetLang::CSharp,
    );
    assert_eq!(lines, vec!["public int? Age { get; set; }"]);

    let lines = plain_property_lines(
        &member("Customer", "Name", "string", false),
        TargetLang::TypeScript,
    );
    assert_eq!(lines, vec!["name: string = '';"]);

    let lines = plain_property_lines(
        &member("Customer", "State", "enum<OrderState>", false),
        TargetLang::TypeScript,
    );
    assert_eq!(lines, vec!["state!: OrderState;"]);
}

#[test]
fn test_notifying_property_has_three_seams() {
    let lines = notifying_property_lines(
        &member("Customer", "Name", "string", false),
        TargetLang::CSharp,
    );
    let text = lines.join("\n");
    assert!(text.contains("private string _name = string.Empty;"));
    assert!(text.contains("OnNameRead();"));
    assert!(text.contains("OnNameChanging(ref incoming, ref cancel);"));
    assert!(text.contains("OnNameChanged();"));
    assert!(text.contains("RaisePropertyChanged(nameof(Name));"));
    // Seam declarations appear exactly once each.
    assert_eq!(text.matches("partial void OnNameRead();").count(), 1);
    assert_eq!(
        text.matches("partial void OnNameChanging(ref string value, ref bool cancel);").count(),
        1
    );
}

#[test]
fn test_notifying_property_read_only_member() {
    let mut m = member("Customer", "Total", "decimal", false);
    m.writable = false;
    let text = notifying_property_lines(&m, TargetLang::CSharp).join("\n");
    assert!(text.contains("get"));
    assert!(!text.contains("set"));
    assert!(!text.contains("OnTotalChanged"));
}

#[test]
fn test_property_form_dispatch() {
    let m = member("Customer", "Name", "string", false);
    assert_eq!(
        property_lines(&m, TargetLang::CSharp, PropertyForm::Plain),
        plain_property_lines(&m, TargetLang::CSharp)
    );
    assert_eq!(
        property_lines(&m, TargetLang::CSharp, PropertyForm::Notifying),
        notifying_property_lines(&m, TargetLang::CSharp)
    );
}

#[test]
fn test_copy_statement_shapes() {
    let scalar = copy_statement(&member("Customer", "Id", "int", false), "source", "target");
    assert_eq!(scalar, "target.Id = source.Id;");

    let collection = copy_statement(
        &member("Customer", "Orders", "list<Order>", true),
        "source",
        "target",
    );
    assert_eq!(
        collection,
        "target.Orders = source.Orders?.Select(item => Order.CreateFrom(item)).ToList();"
    );

    let scalar_list = copy_statement(
        &member("Customer", "Tags", "list<string>", true),
        "source",
        "target",
    );
    assert_eq!(scalar_list, "target.Tags = source.Tags?.ToList();");

    let entity = copy_statement(
        &member("Order", "Parent", "Customer", true),
        "source",
        "target",
    );
    assert_eq!(
        entity,
        "target.Parent = source.Parent == null ? null : Customer.CreateFrom(source.Parent);"
    );
}

#[test]
fn test_copy_recurses_exactly_one_level() {
    // Order has a nested Customer whose own members include another
    // entity; the generated statement must delegate the grandchild copy
    // to Customer's factory instead of inlining it.
    let order = TypeDescriptor {
        name: "Order".into(),
        namespace: "Acme.Domain.Entities.Sales".into(),
        members: vec![
            member("Order", "Id", "int", false),
            member("Order", "Customer", "Customer", true),
        ],
        base_type: None,
        exported: true,
        is_abstract: false,
        is_nested: false,
        generic_args: vec![],
    };
    let settings = SettingsStore::default();
    let statements = copy_statements(&order, UnitKind::Logic, &settings, "source", "target");
    assert_eq!(statements.len(), 2);
    assert_eq!(
        statements[1],
        "target.Customer = source.Customer == null ? null : Customer.CreateFrom(source.Customer);"
    );
    // One level only: no trace of Customer's own members.
    assert!(!statements[1].contains("Orders"));
}

#[test]
fn test_copy_skips_bookkeeping_and_gated_members() {
    let table = "\
unit;item;itemName;setting;value
Logic;ModelProperty;Customer.Orders;Generate;False
";
    let settings = SettingsStore::parse(table);
    let statements = copy_statements(&customer(), UnitKind::Logic, &settings, "source", "target");
    let text = statements.join("\n");
    assert!(text.contains("target.Id"));
    assert!(text.contains("target.Name"));
    assert!(!text.contains("Orders"));
    assert!(!text.contains("RowVersion"));
}

#[test]
fn test_factory_pair_with_seams() {
    let settings = SettingsStore::default();
    let text = factory_lines("Customer", &customer(), UnitKind::Logic, &settings, "Customer").join("\n");
    assert!(text.contains("public static Customer CreateNew()"));
    assert!(text.contains("public static Customer CreateFrom(object source)"));
    assert!(text.contains("public static Customer CreateFrom(Customer source)"));
    assert!(text.contains("ModelMapper.CopyMatching(source, target);"));
    assert!(text.contains("static partial void OnCreating();"));
    assert!(text.contains("static partial void OnCreated(Customer target);"));
    // Every creation path is bracketed by the seams.
    assert_eq!(text.matches("OnCreating();").count(), 4);
    assert_eq!(text.matches("OnCreated(target);").count(), 3);
}

#[test]
fn test_ts_factory_copy() {
    let settings = SettingsStore::default();
    let text =
        ts_factory_lines(&customer(), UnitKind::ClientApp, &settings, "ICustomer").join("\n");
    assert!(text.contains("static empty(): Customer {"));
    assert!(text.contains("static from(source: Partial<ICustomer>): Customer {"));
    assert!(text.contains("target.id = source.id ?? 0;"));
    assert!(text.contains("target.orders = (source.orders ?? []).map(item => Order.from(item));"));
}

#[test]
fn test_equality_uses_version_identity_only() {
    let text = equality_lines(&customer()).join("\n");
    assert!(text.contains("if (obj is not Customer other)"));
    assert!(text.contains("Id == other.Id"));
    // binary row version goes through the shared deep-equality helper
    assert!(text.contains("DeepEquality.Equals(RowVersion, other.RowVersion)"));
    assert!(!text.contains("Name =="));
}

#[test]
fn test_equality_absent_without_identity_members() {
    let bare = TypeDescriptor {
        name: "Note".into(),
        namespace: "Acme.Domain.Entities".into(),
        members: vec![member("Note", "Text", "string", false)],
        base_type: None,
        exported: true,
        is_abstract: false,
        is_nested: false,
        generic_args: vec![],
    };
    assert!(equality_lines(&bare).is_empty());
    // Hash still emits, combining the one copyable member.
    let settings = SettingsStore::default();
    let hash = hash_lines(&bare, UnitKind::Logic, &settings).join("\n");
    assert!(hash.contains("HashCode.Combine(Text)"));
}

#[test]
fn test_hash_falls_back_to_inherited() {
    let empty = TypeDescriptor {
        name: "Marker".into(),
        namespace: "Acme.Domain.Entities".into(),
        members: vec![member("Marker", "RowVersion", "binary", true)],
        base_type: None,
        exported: true,
        is_abstract: false,
        is_nested: false,
        generic_args: vec![],
    };
    let settings = SettingsStore::default();
    let text = hash_lines(&empty, UnitKind::Logic, &settings).join("\n");
    assert!(text.contains("return base.GetHashCode();"));
}

#[test]
fn test_hash_uses_nary_form_beyond_eight_members() {
    let wide = TypeDescriptor {
        name: "Wide".into(),
        namespace: "Acme.Domain.Entities".into(),
        members: (0..9)
            .map(|i| member("Wide", &format!("Field{i}"), "int", false))
            .collect(),
        base_type: None,
        exported: true,
        is_abstract: false,
        is_nested: false,
        generic_args: vec![],
    };
    let settings = SettingsStore::default();
    let text = hash_lines(&wide, UnitKind::Logic, &settings).join("\n");
    assert!(text.contains("var hash = new HashCode();"));
    assert!(text.contains("hash.Add(Field8);"));
    assert!(text.contains("return hash.ToHashCode();"));
}

#[test]
fn test_facade_forwards_value_members() {
    let settings = SettingsStore::default();
    let text =
        facade_member_lines(&member("Customer", "Name", "string", false), &settings).join("\n");
    assert!(text.contains("return _inner.Name;"));
    assert!(text.contains("_inner.Name = incoming;"));
    assert!(text.contains("RaisePropertyChanged(nameof(Name));"));
}

#[test]
fn test_facade_projects_shaped_members_lazily() {
    let settings = SettingsStore::default();
    let entity =
        facade_member_lines(&member("Order", "Customer", "Customer", true), &settings).join("\n");
    assert!(entity.contains("public CustomersFacade Customer"));
    assert!(entity
        .contains("return _inner.Customer == null ? null : new CustomersFacade(_inner.Customer);"));
    // Read-only: projections never expose a setter.
    assert!(!entity.contains("set"));

    let coll =
        facade_member_lines(&member("Customer", "Orders", "list<Order>", true), &settings)
            .join("\n");
    assert!(coll.contains("public IEnumerable<OrdersFacade> Orders"));
    assert!(coll.contains("_inner.Orders?.Select(item => new OrdersFacade(item));"));
}

#[test]
fn test_facade_explicit_pairing() {
    let table = "\
unit;item;itemName;setting;value
Facade;Property;Customer.DisplayName;DelegateMember;Name
";
    let settings = SettingsStore::parse(table);
    let m = member("Customer", "DisplayName", "string", false);
    assert_eq!(facade_target_member(&m, &settings), "Name");
    let text = facade_member_lines(&m, &settings).join("\n");
    assert!(text.contains("return _inner.Name;"));
    assert!(text.contains("public string DisplayName"));
}

#[test]
fn test_indent_block_preserves_blank_lines() {
    let block = indent_block(vec!["a".to_string(), String::new(), "b".to_string()], 2);
    assert_eq!(block, vec!["        a", "", "        b"]);
}
