pub fn print_banner(version: &str) {
    let banner = format!(
        r#"
 ███████╗ █████╗
 ██╔════╝██╔══██╗    feedarr
 █████╗  ███████║    v{}
 ██╔══╝  ██╔══██║
 ██║     ██║  ██║
 ╚═╝     ╚═╝  ╚═╝
"#,
        version
    );

    tracing::info!("{}", banner);
}
