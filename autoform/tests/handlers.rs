//! Form and security metadata handlers against attribute records.

use autoform::serializer::{
    read_field, write_field, AttributeNode, Element, FieldMetadataHandler, FormSchema,
    SecuritySchema,
};
use autoform::{Directive, MetadataStore, Relation};
use autoform_test_helpers::{field, form_attr, form_element, security_attr, security_element};

#[test]
fn form_read() {
    let node = form_element(&[
        ("widget", "SomeWidget"),
        ("mode", "hidden"),
        ("omitted", "true"),
        ("before", "somefield"),
    ]);
    let mut store = MetadataStore::default();
    FormSchema.read(&node, &mut store, &field("dummy"));

    assert_eq!(store.widgets().and_then(|m| m.get("dummy")).map(String::as_str), Some("SomeWidget"));
    assert_eq!(store.omitted_for("dummy"), Some("true"));
    assert_eq!(store.mode_for("dummy"), Some("hidden"));
    assert_eq!(
        store.order(),
        Some(&[Directive::new("dummy", Relation::Before, "somefield")][..])
    );
}

#[test]
fn form_read_multiple_fields() {
    let first = form_element(&[
        ("widget", "SomeWidget"),
        ("mode", "hidden"),
        ("omitted", "true"),
        ("before", "somefield"),
    ]);
    let second = form_element(&[("mode", "display"), ("omitted", "yes")]);

    let mut store = MetadataStore::default();
    FormSchema.read(&first, &mut store, &field("dummy1"));
    FormSchema.read(&second, &mut store, &field("dummy2"));

    let widgets: Vec<_> = store.widgets().into_iter().flatten().collect();
    assert_eq!(widgets.len(), 1);
    assert_eq!(store.widget_for("dummy1"), Some("SomeWidget"));

    let omitted: Vec<(&str, &str)> = store
        .omitted()
        .into_iter()
        .flatten()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    assert_eq!(omitted, [("dummy1", "true"), ("dummy2", "yes")]);

    let modes: Vec<(&str, &str)> = store
        .modes()
        .into_iter()
        .flatten()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    assert_eq!(modes, [("dummy1", "hidden"), ("dummy2", "display")]);

    assert_eq!(
        store.order(),
        Some(&[Directive::new("dummy1", Relation::Before, "somefield")][..])
    );
}

#[test]
fn repeated_reads_append_directives() {
    let mut store = MetadataStore::default();
    FormSchema.read(&form_element(&[("before", "first")]), &mut store, &field("dummy"));
    FormSchema.read(&form_element(&[("after", "second")]), &mut store, &field("dummy"));

    assert_eq!(
        store.order(),
        Some(
            &[
                Directive::new("dummy", Relation::Before, "first"),
                Directive::new("dummy", Relation::After, "second"),
            ][..]
        )
    );

    let mut node = Element::new("field");
    FormSchema.write(&mut node, &store, &field("dummy"));
    assert_eq!(form_attr(&node, "before"), Some("first"));
    assert_eq!(form_attr(&node, "after"), Some("second"));
}

#[test]
fn form_read_without_data_leaves_store_untouched() {
    let node = Element::new("field");
    let mut store = MetadataStore::default();
    FormSchema.read(&node, &mut store, &field("dummy"));

    assert!(store.widgets().is_none());
    assert!(store.omitted().is_none());
    assert!(store.modes().is_none());
    assert!(store.order().is_none());
    assert!(store.is_empty());
}

#[test]
fn form_write() {
    let mut store = MetadataStore::default();
    store.widgets_mut().insert("dummy".into(), "SomeWidget".into());
    store.omitted_mut().insert("dummy".into(), "true".into());
    store.modes_mut().insert("dummy".into(), "hidden".into());
    store
        .order_mut()
        .push(Directive::new("dummy", Relation::Before, "somefield"));

    let mut node = Element::new("field");
    FormSchema.write(&mut node, &store, &field("dummy"));

    assert_eq!(form_attr(&node, "widget"), Some("SomeWidget"));
    assert_eq!(form_attr(&node, "omitted"), Some("true"));
    assert_eq!(form_attr(&node, "mode"), Some("hidden"));
    assert_eq!(form_attr(&node, "before"), Some("somefield"));
    assert_eq!(form_attr(&node, "after"), None);
}

#[test]
fn form_write_partial() {
    let mut store = MetadataStore::default();
    store.widgets_mut().insert("dummy".into(), "SomeWidget".into());
    store.omitted_mut().insert("dummy2".into(), "true".into());
    store.modes_mut().insert("dummy".into(), "display".into());
    store.modes_mut().insert("dummy2".into(), "hidden".into());
    store.order_mut();

    let mut node = Element::new("field");
    FormSchema.write(&mut node, &store, &field("dummy"));

    assert_eq!(form_attr(&node, "widget"), Some("SomeWidget"));
    assert_eq!(form_attr(&node, "omitted"), None);
    assert_eq!(form_attr(&node, "mode"), Some("display"));
    assert_eq!(form_attr(&node, "before"), None);
}

#[test]
fn form_write_without_data() {
    let store = MetadataStore::default();
    let mut node = Element::new("field");
    FormSchema.write(&mut node, &store, &field("dummy"));
    assert!(node.attributes.is_empty());
}

#[test]
fn form_round_trip_reproduces_attributes() {
    let original = form_element(&[
        ("widget", "W"),
        ("mode", "input"),
        ("omitted", "false"),
        ("before", "anchor"),
    ]);
    let mut store = MetadataStore::default();
    FormSchema.read(&original, &mut store, &field("f"));

    let mut written = Element::new("field");
    FormSchema.write(&mut written, &store, &field("f"));
    assert_eq!(written, original);
}

#[test]
fn security_read() {
    let node = security_element(&[
        ("read-permission", "dummy.Read"),
        ("write-permission", "dummy.Write"),
    ]);
    let mut store = MetadataStore::default();
    SecuritySchema.read(&node, &mut store, &field("dummy"));

    assert_eq!(store.read_permission_for("dummy"), Some("dummy.Read"));
    assert_eq!(store.write_permission_for("dummy"), Some("dummy.Write"));
}

#[test]
fn security_read_without_permissions() {
    let node = Element::new("field");
    let mut store = MetadataStore::default();
    SecuritySchema.read(&node, &mut store, &field("dummy"));
    assert!(store.read_permissions().is_none());
    assert!(store.write_permissions().is_none());
}

#[test]
fn security_write() {
    let mut store = MetadataStore::default();
    store.set_read_permission("dummy", Some("dummy.Read"));
    store.set_write_permission("dummy", Some("dummy.Write"));

    let mut node = Element::new("field");
    SecuritySchema.write(&mut node, &store, &field("dummy"));
    assert_eq!(security_attr(&node, "read-permission"), Some("dummy.Read"));
    assert_eq!(security_attr(&node, "write-permission"), Some("dummy.Write"));
}

#[test]
fn security_write_cleared_permission() {
    let mut store = MetadataStore::default();
    store.read_permissions_mut().insert("dummy".into(), None);

    let mut node = Element::new("field");
    SecuritySchema.write(&mut node, &store, &field("dummy"));
    assert_eq!(security_attr(&node, "read-permission"), None);
    assert_eq!(security_attr(&node, "write-permission"), None);
}

#[test]
fn security_write_without_metadata() {
    let store = MetadataStore::default();
    let mut node = Element::new("field");
    SecuritySchema.write(&mut node, &store, &field("dummy"));
    assert!(node.attributes.is_empty());
}

#[test]
fn handlers_are_independent() {
    let mut node = form_element(&[("widget", "W")]);
    node.set(
        &autoform::serializer::ns("read-permission", autoform::SECURITY_NAMESPACE),
        "p.Read",
    );

    let mut store = MetadataStore::default();
    read_field(&node, &mut store, &field("f"));
    assert_eq!(store.widget_for("f"), Some("W"));
    assert_eq!(store.read_permission_for("f"), Some("p.Read"));

    let written = write_field(&store, &field("f"));
    assert_eq!(written.get("name"), Some("f"));
    assert_eq!(form_attr(&written, "widget"), Some("W"));
    assert_eq!(security_attr(&written, "read-permission"), Some("p.Read"));
}
