//! Example: query a page and serialize its login form

use hq_query::elements::HrefCapable;
use hq_query::parse_html_with_url;

const PAGE: &str = r#"
<html>
<body>
    <nav><a href="/">Home</a><a href="docs/intro">Docs</a></nav>
    <form id="login" action="/session" method="post">
        <input name="user" value="jane">
        <input name="remember" type="checkbox" checked>
        <input type="submit" value="Sign in">
    </form>
</body>
</html>
"#;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let doc = parse_html_with_url(PAGE, "https://example.com/app/")?;

    for link in doc.find("nav a").get_all() {
        if let Some(a) = link.as_anchor() {
            println!("{} -> {}", a.text(), a.href());
        }
    }

    let form = doc.find("#login");
    println!("POST {} {}", form.url_attr("action"), form.serialize());
    Ok(())
}
