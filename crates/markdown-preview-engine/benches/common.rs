// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_markdown_content(size: usize) -> String {
    let base = "# Title\n\n## Section\n\nParagraph with **some** content and a [link](https://example.com).\n\n- Bullet point\n  - Nested item\n- Another item\n\n```rust\nfn example() {\n    println!(\"Hello\");\n}\n```\n\n";
    base.repeat(size)
}

#[allow(dead_code)]
pub fn generate_feature_markdown(sections: usize) -> String {
    let mut content = String::new();

    for section in 0..sections {
        content.push_str(&format!("## Section {section}\n\n"));
        content.push_str("First line of a paragraph\nsecond line with a note[^n");
        content.push_str(&format!("{section}].\n\n"));
        content.push_str("| Name | Value |\n|:-----|------:|\n");
        for row in 0..5 {
            content.push_str(&format!("| item {row} | {} |\n", row * section));
        }
        content.push('\n');
        content.push_str("- [x] done\n- [ ] pending\n  1. nested step\n\n---\n\n");
        content.push_str(&format!("[^n{section}]: Footnote for section {section}.\n\n"));
    }

    content
}
