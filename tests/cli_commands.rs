// Tests for the command functions behind the binary.
use crampon::cli::{self, Command, RenderArgs};
use crampon::config::DecorationMode;
use crampon::context::{AppContext, TestContext};
use std::fs;
use std::path::PathBuf;

const LIST: &str = r#"<ul>
  <li data-crampon="x">Apple</li>
  <li data-crampon="x">Pear</li>
  <li data-crampon="y">Leek</li>
  <li data-crampon="x">Plum</li>
</ul>"#;

fn write_list(ctx: &TestContext, markup: &str) -> PathBuf {
    let path = ctx.root.join("list.html");
    fs::write(&path, markup).unwrap();
    path
}

#[test]
fn test_render_ordinal_html() {
    let ctx = TestContext::new();
    let input = write_list(&ctx, LIST);
    let args = RenderArgs {
        input,
        mode: Some(DecorationMode::Ordinal),
        ..RenderArgs::default()
    };

    let html = cli::render_command(&args, &ctx).unwrap();
    assert!(html.starts_with("<ul class=\"crampon-list\" style=\"padding-left: 40px;\">\n"));
    assert!(html.contains(
        "<li data-crampon=\"x\"><div class=\"crampon-box\" style=\"height: 20px; width: 7px; left: -7px; text-indent: -17.5px; border-left: 3px solid #000; border-radius: 7px 0 0 0;\">1</div>Apple</li>"
    ));
    assert!(html.contains(">2</div>Leek</li>"));
    assert!(html.contains("border-radius: 0 0 0 7px;\"></div>Plum</li>"));
}

#[test]
fn test_render_icon_html_with_flags() {
    let ctx = TestContext::new();
    let input = write_list(&ctx, LIST);
    let args = cli::parse_args(&[
        "render".to_string(),
        input.to_string_lossy().to_string(),
        "--icon".to_string(),
        "x=x.png".to_string(),
        "--icon".to_string(),
        "y=y.png".to_string(),
        "--item-height".to_string(),
        "30".to_string(),
    ])
    .unwrap();

    let html = cli::execute(&args.command, &ctx, "crampon").unwrap();
    assert!(html.contains("<img src=\"x.png\""));
    assert!(html.contains("<img src=\"y.png\""));
    // last of x is item 3, shortened from 30px
    assert!(html.contains("height: 25.5px;"));
}

#[test]
fn test_render_without_icons_fails() {
    let ctx = TestContext::new();
    let input = write_list(&ctx, LIST);
    let args = RenderArgs {
        input,
        ..RenderArgs::default()
    };
    let err = cli::render_command(&args, &ctx).unwrap_err();
    assert!(err.to_string().contains("no icon mapped for group 'x'"));
}

#[test]
fn test_render_reads_config_file() {
    let ctx = TestContext::new();
    let input = write_list(&ctx, LIST);
    fs::write(
        ctx.get_config_file_path().unwrap(),
        "mode = \"ordinal\"\nwidth = \"24px\"\n",
    )
    .unwrap();

    let args = RenderArgs {
        input,
        ..RenderArgs::default()
    };
    let html = cli::render_command(&args, &ctx).unwrap();
    assert!(html.contains("padding-left: 24px;"));
    assert!(html.contains(">1</div>Apple"));
}

#[test]
fn test_groups_plain_and_json() {
    let ctx = TestContext::new();
    let input = write_list(&ctx, LIST);

    let text = cli::groups_command(&input, false).unwrap();
    assert_eq!(
        text,
        "0\tx\t1\tfirst\n1\tx\t1\t\n2\ty\t2\tfirst last\n3\tx\t1\tlast\n"
    );

    let json = cli::groups_command(&input, true).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["groups"][0]["tag"], "x");
    assert_eq!(value["groups"][0]["items"], serde_json::json!([0, 1, 3]));
    assert_eq!(value["groups"][1]["ordinal"], 2);
}

#[test]
fn test_groups_reports_missing_tag() {
    let ctx = TestContext::new();
    let input = write_list(&ctx, "<ol><li data-crampon=\"a\">A</li><li>B</li></ol>");
    let text = cli::groups_command(&input, false).unwrap();
    assert_eq!(text, "missing data-crampon on item 1\n");
}

#[test]
fn test_config_init_writes_file_once() {
    let ctx = TestContext::new();
    let path = ctx.get_config_file_path().unwrap();
    assert!(!path.exists());

    let out = cli::execute(&Command::Config { init: true }, &ctx, "crampon").unwrap();
    assert!(path.exists());
    assert!(out.starts_with(&format!("# {}\n", path.display())));
    assert!(out.contains("marker_color = \"#000\""));

    fs::write(&path, "marker_color = \"red\"\n").unwrap();
    let out = cli::execute(&Command::Config { init: true }, &ctx, "crampon").unwrap();
    assert!(out.contains("marker_color = \"red\""));
}

#[test]
fn test_help_mentions_commands() {
    let ctx = TestContext::new();
    let help = cli::execute(&Command::Help, &ctx, "crampon").unwrap();
    assert!(help.contains("crampon render <list.html>"));
    assert!(help.contains("--mode icon|ordinal"));
}
