use crampon::model::{ItemId, partition};
use crampon::render::{MarkupSurface, Renderer};
use crampon::source::parse_list;
use crampon::{Config, DecorationMode};

#[test]
fn test_nested_items_are_collected_in_document_order() {
    let list = parse_list(
        r#"<ol>
            <li data-crampon="a">Outer
                <ul><li data-crampon="b">Inner</li></ul>
            </li>
            <li data-crampon="a">After</li>
        </ol>"#,
    )
    .unwrap();

    let tags: Vec<_> = list.items.iter().map(|i| i.tag.as_deref()).collect();
    assert_eq!(tags, vec![Some("a"), Some("b"), Some("a")]);
    assert_eq!(list.texts, vec!["Outer", "Inner", "After"]);
    assert_eq!(list.items[2].id, ItemId(2));

    let result = partition(&list.items).unwrap();
    assert_eq!(result.group("a").unwrap().items, vec![ItemId(0), ItemId(2)]);
}

#[test]
fn test_non_list_root_is_accepted() {
    let list = parse_list(r#"<div><li data-crampon="a">Only</li></div>"#).unwrap();
    assert_eq!(list.list_tag, "div");
    assert_eq!(list.items.len(), 1);
}

#[test]
fn test_existing_classes_are_kept_when_rendering() {
    let list = parse_list(r#"<ul class="menu wide"><li data-crampon="k">Key</li></ul>"#).unwrap();
    let mut surface = MarkupSurface::from_source(&list);

    Renderer::new(Config::default().with_mode(DecorationMode::Ordinal))
        .render(&list.items, &mut surface)
        .unwrap();

    let html = surface.to_html();
    assert!(html.starts_with("<ul class=\"menu wide crampon-list\""));
    assert!(html.contains(">1</div>Key</li>"));
}

#[test]
fn test_entities_outside_xml_are_rejected() {
    assert!(parse_list("<ul><li data-crampon=\"a\">a&nbsp;b</li></ul>").is_err());
    assert!(parse_list("<ul><li data-crampon=\"a\">a &amp; b</li></ul>").is_ok());
}
