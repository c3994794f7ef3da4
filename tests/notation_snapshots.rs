//! Snapshot tests for settled cards printed in block notation

use card_block::{print, settle, settle_with_config, CardConfig, SettleConfig, VariationRegistry};

#[test]
fn test_empty_card_gets_default_layout() {
    let output = print(&settle("").unwrap());
    insta::assert_snapshot!(output.trim_end(), @r#"
    core/image
    ltic/card-inner-text-block [templateLock: "false"] {
        core/heading
        core/paragraph
    }
    core/button [backgroundColor: "accent-3", text: "Read More"]
    "#);
}

#[test]
fn test_loose_content_fills_layout() {
    let source = r#"
        core/paragraph [content: "Fresh roasted beans every morning."]
        core/heading [content: "Coffee", level: 3]
        core/image [id: 12, url: "coffee.jpg"]
        core/quote [value: "Dropped: no slot for it"]
    "#;
    let output = print(&settle(source).unwrap());
    insta::assert_snapshot!(output.trim_end(), @r#"
    core/image [id: 12, url: "coffee.jpg"]
    ltic/card-inner-text-block [templateLock: "false"] {
        core/heading [content: "Coffee", level: 3]
        core/paragraph [content: "Fresh roasted beans every morning."]
    }
    core/button [backgroundColor: "accent-3", text: "Read More"]
    "#);
}

#[test]
fn test_query_loop_card() {
    let config = SettleConfig::new()
        .with_query_loop(true)
        .with_card_config(CardConfig::default().with_default_image("placeholder.png", "Default Image"));
    let output = print(&settle_with_config(r#"core/heading [level: 2]"#, &config).unwrap());
    insta::assert_snapshot!(output.trim_end(), @r#"
    core/post-featured-image [alt: "Default Image", url: "placeholder.png"]
    ltic/card-inner-text-block [templateLock: "false"] {
        core/post-title [isLink: true, level: 2]
        core/post-excerpt
    }
    core/read-more
    "#);
}

#[test]
fn test_custom_variations() {
    let registry = VariationRegistry::from_str(
        r#"
[[variation]]
name = "text-only"
default = true
template = """
core/group [layout: "stack"] {
    core/heading [level: 4]
    core/paragraph
}
"""
"#,
    )
    .unwrap();
    let config = SettleConfig::new().with_variations(registry);
    let output = print(&settle_with_config(r#"core/image core/paragraph [content: "Hi"]"#, &config).unwrap());
    insta::assert_snapshot!(output.trim_end(), @r#"
    core/group [layout: "stack"] {
        core/heading [level: 4]
        core/paragraph [content: "Hi"]
    }
    "#);
}
