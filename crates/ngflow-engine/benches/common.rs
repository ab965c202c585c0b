// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_flat_chain(size: usize) -> String {
    let mut template = String::from("@if (a) {\n  <p>first</p>\n}\n");
    template.push_str(&"@else if (b) {\n  {{ value }}\n}\n".repeat(size));
    template.push_str("@else {\n  <p>last</p>\n}\n");
    template
}

#[allow(dead_code)]
pub fn generate_template_content(size: usize) -> String {
    let base = "<section>\n  @if (user) {\n    <p>{{ user.name }}</p>\n  } @else {\n    <login/>\n  }\n  @for (item of items; track item.id) {\n    <li>{{ item }}</li>\n  } @empty {\n    <li>none</li>\n  }\n  @switch (mode) {\n    @case ('a') { A }\n    @default { B }\n  }\n</section>\n";
    base.repeat(size)
}
