// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
#[allow(dead_code)]
pub fn generate_post(blocks: usize) -> String {
    let base = concat!(
        "<!-- wp:heading --><h2 class=\"title\">Section</h2><!-- /wp:heading -->",
        "<!-- wp:paragraph --><p>Paragraph with <b>bold</b>, <i>italic</i> and ",
        "<a href=\"https://example.org\">a link</a>.<!--more--></p><!-- /wp:paragraph -->",
        "<!-- wp:list --><ul><li>first</li><li>second <u>item</u></li><li></li></ul><!-- /wp:list -->",
        "<!-- wp:image --><figure><img src=\"a.png\" /><figcaption>cap</figcaption></figure><!-- /wp:image -->",
    );
    base.repeat(blocks)
}
