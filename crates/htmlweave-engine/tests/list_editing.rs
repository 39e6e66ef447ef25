use htmlweave_engine::{Cmd, Document, FormatKind};
use pretty_assertions::assert_eq;
use rstest::rstest;

const LIST: &str = "<ol><li a=\"1\">Ordered</li></ol>";
const ORIGINAL_ITEM: &str = "<li a=\"1\">Ordered</li>";

fn append(doc: &mut Document, text: &str) {
    let end = doc.len();
    doc.apply_insert(end, text).unwrap();
}

#[test]
fn append_item_to_list() {
    let mut doc = Document::decode(LIST).unwrap();
    append(&mut doc, "\n");
    append(&mut doc, "after");
    assert_eq!(doc.encode(), format!("<ol>{ORIGINAL_ITEM}<li>after</li></ol>"));

    doc.apply_insert(0, "\n").unwrap();
    assert_eq!(
        doc.encode(),
        format!("<ol><li></li>{ORIGINAL_ITEM}<li>after</li></ol>")
    );

    append(&mut doc, "\n");
    assert_eq!(
        doc.encode(),
        format!("<ol><li></li>{ORIGINAL_ITEM}<li>after</li><li></li></ol>")
    );
}

#[test]
fn prepend_item_to_list() {
    let mut doc = Document::decode(LIST).unwrap();
    doc.apply_insert(0, "before\n").unwrap();
    assert_eq!(
        doc.encode(),
        format!("<ol><li>before</li>{ORIGINAL_ITEM}</ol>")
    );

    doc.apply_insert(0, "\n").unwrap();
    assert_eq!(
        doc.encode(),
        format!("<ol><li></li><li>before</li>{ORIGINAL_ITEM}</ol>")
    );

    append(&mut doc, "\n");
    assert_eq!(
        doc.encode(),
        format!("<ol><li></li><li>before</li>{ORIGINAL_ITEM}<li></li></ol>")
    );

    doc.apply_delete(0, 1).unwrap();
    assert_eq!(
        doc.encode(),
        format!("<ol><li>before</li>{ORIGINAL_ITEM}<li></li></ol>")
    );
}

#[test]
fn split_keeps_attributes_on_the_first_half() {
    let mut doc = Document::decode("<ul><li a=\"A\">abcdef</li></ul>").unwrap();
    let patch = doc.apply_insert(3, "\n").unwrap();
    assert_eq!(doc.encode(), "<ul><li a=\"A\">abc</li><li>def</li></ul>");
    assert_eq!(patch.spans.added.len(), 1);

    let list = doc.spans()[0].id;
    let items = doc.list_items(list);
    assert_eq!(items.len(), 2);
    assert_eq!(doc.span(items[1]).map(|s| s.attributes.is_empty()), Some(true));
}

#[test]
fn items_are_independent() {
    let mut doc = Document::decode("<ul><li a=\"A\">a</li><li b=\"B\">b</li></ul>").unwrap();
    doc.apply_delete(0, 1).unwrap();
    assert_eq!(doc.encode(), "<ul><li a=\"A\"></li><li b=\"B\">b</li></ul>");
    doc.apply_delete(1, 2).unwrap();
    assert_eq!(doc.encode(), "<ul><li a=\"A\"></li><li b=\"B\"></li></ul>");
}

#[rstest]
#[case::text_only("<ul><li>one</li><li>two</li></ul>", &[(4, 7), (0, 3)], "<ul><li></li><li></li></ul>")]
#[case::with_separators("<ul><li>one</li><li>two</li></ul>", &[(0, 7)], "<ul><li></li></ul>")]
#[case::three_items("<ol><li>a</li><li>b</li><li>c</li></ol>", &[(0, 5)], "<ol><li></li></ol>")]
fn emptying_a_list(
    #[case] html: &str,
    #[case] deletions: &[(usize, usize)],
    #[case] expected: &str,
) {
    let mut doc = Document::decode(html).unwrap();
    for &(start, end) in deletions {
        doc.apply_delete(start, end).unwrap();
    }
    assert_eq!(doc.encode(), expected);
}

#[test]
fn typing_into_empty_list_fills_the_item() {
    let mut doc = Document::decode("<ul><li></li></ul>").unwrap();
    doc.apply_insert(0, "first\nsecond").unwrap();
    assert_eq!(doc.encode(), "<ul><li>first</li><li>second</li></ul>");
}

#[test]
fn nested_list_splits_innermost_item() {
    let mut doc = Document::decode("<ul><li>a<ul><li>bc</li></ul></li></ul>").unwrap();
    // text is "a\nbc"
    doc.apply_insert(3, "\n").unwrap();
    assert_eq!(
        doc.encode(),
        "<ul><li>a<ul><li>b</li><li>c</li></ul></li></ul>"
    );
}

#[test]
fn bold_across_split_is_carried_into_the_new_item() {
    let mut doc = Document::decode("<ul><li>abcd</li></ul>").unwrap();
    doc.add_span(FormatKind::Bold, 1..3, Default::default()).unwrap();
    doc.apply(Cmd::insert(2, "\n")).unwrap();
    assert_eq!(
        doc.encode(),
        "<ul><li>a<b>b</b></li><li><b>c</b>d</li></ul>"
    );
}

#[test]
fn joining_items_keeps_the_upper_attributes() {
    let mut doc = Document::decode("<ul><li a=\"A\">ab</li><li b=\"B\">cd</li></ul>").unwrap();
    doc.apply_delete(2, 3).unwrap();
    assert_eq!(doc.encode(), "<ul><li a=\"A\">abcd</li></ul>");
}

#[test]
fn moving_items_around_keeps_attributes_in_place() {
    let mut doc = Document::decode(
        "<ul><li a=\"A\"></li><li></li><li b=\"B\">b</li><li c=\"C\">c</li></ul>",
    )
    .unwrap();

    doc.apply_insert(0, "\n").unwrap();
    assert_eq!(
        doc.encode(),
        "<ul><li a=\"A\"></li><li></li><li></li><li b=\"B\">b</li><li c=\"C\">c</li></ul>"
    );

    doc.apply_insert(0, "a").unwrap();
    doc.apply_insert(1, "\n").unwrap();
    assert_eq!(
        doc.encode(),
        "<ul><li a=\"A\">a</li><li></li><li></li><li></li><li b=\"B\">b</li><li c=\"C\">c</li></ul>"
    );

    doc.apply_insert(0, "\n").unwrap();
    let moved_down =
        "<ul><li></li><li a=\"A\">a</li><li></li><li></li><li></li><li b=\"B\">b</li><li c=\"C\">c</li></ul>";
    assert_eq!(doc.encode(), moved_down);

    append(&mut doc, "\n");
    assert_eq!(
        doc.encode(),
        "<ul><li></li><li a=\"A\">a</li><li></li><li></li><li></li><li b=\"B\">b</li><li c=\"C\">c</li><li></li></ul>"
    );

    // Enter again in the new, still empty last item leaves the list.
    append(&mut doc, "\n");
    assert_eq!(doc.encode(), moved_down);

    doc.apply_insert(7, "\n").unwrap();
    assert_eq!(
        doc.encode(),
        "<ul><li></li><li a=\"A\">a</li><li></li><li></li><li></li><li b=\"B\">b</li><li></li><li c=\"C\">c</li></ul>"
    );
}

#[test]
fn enter_on_empty_last_item_leaves_the_list() {
    let mut doc = Document::decode("<ul><li>a</li></ul><p>b</p>").unwrap();
    doc.apply_insert(1, "\n").unwrap();
    assert_eq!(doc.encode(), "<ul><li>a</li><li></li></ul><p>b</p>");

    let patch = doc.apply_insert(2, "\n").unwrap();
    assert_eq!(doc.encode(), "<ul><li>a</li></ul><p>b</p>");
    assert_eq!(doc.text(), "a\nb");
    assert_eq!(patch.spans.removed.len(), 1);
}

#[test]
fn newline_in_item_paragraph_splits_the_item() {
    let mut doc = Document::decode("<ul><li><p>ab</p></li><li><p>c</p></li></ul>").unwrap();
    doc.apply_insert(1, "\n").unwrap();
    assert_eq!(
        doc.encode(),
        "<ul><li><p>a</p></li><li><p>b</p></li><li><p>c</p></li></ul>"
    );
    assert_eq!(Document::decode(&doc.encode()).unwrap().text(), doc.text());
}
