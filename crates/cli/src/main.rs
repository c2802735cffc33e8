use std::io::Write;
use std::path::PathBuf;

use params::RawParams;
use render::RenderOptions;

fn main() -> anyhow::Result<()> {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "render" => cmd_render(&args),
        other => anyhow::bail!("unknown command: {other} (run `cli help`)"),
    }
}

fn print_help() {
    eprintln!(
        r#"placeholder cli

USAGE:
  cli render <color> <width> <height> [--text <text>] [--cross] [-o <path>|-]

Writes a PNG placeholder. The default output path is <color>-<width>-<height>.png;
`-o -` writes to stdout.
"#
    );
}

#[derive(Debug, PartialEq, Eq)]
struct RenderArgs<'a> {
    color: &'a str,
    width: &'a str,
    height: &'a str,
    text: Option<&'a str>,
    cross: bool,
    output: Option<&'a str>,
}

fn positional<'a>(args: &'a [String], idx: usize, name: &str) -> anyhow::Result<&'a str> {
    args.get(idx)
        .map(|s| s.as_str())
        .ok_or_else(|| {
            anyhow::anyhow!("missing {name} (usage: cli render <color> <width> <height>)")
        })
}

fn parse_render_args(args: &[String]) -> anyhow::Result<RenderArgs<'_>> {
    let mut out = RenderArgs {
        color: positional(args, 2, "color")?,
        width: positional(args, 3, "width")?,
        height: positional(args, 4, "height")?,
        text: None,
        cross: false,
        output: None,
    };

    let mut i = 5;
    while i < args.len() {
        match args[i].as_str() {
            "--text" => {
                let v = args
                    .get(i + 1)
                    .ok_or_else(|| anyhow::anyhow!("--text requires a value"))?;
                out.text = Some(v.as_str());
                i += 2;
            }
            "-o" | "--output" => {
                let v = args
                    .get(i + 1)
                    .ok_or_else(|| anyhow::anyhow!("-o requires a value"))?;
                out.output = Some(v.as_str());
                i += 2;
            }
            "--cross" => {
                out.cross = true;
                i += 1;
            }
            other => anyhow::bail!("unknown flag for render: {other}"),
        }
    }

    Ok(out)
}

fn cmd_render(args: &[String]) -> anyhow::Result<()> {
    let ra = parse_render_args(args)?;
    let png = render_to_png(&ra)?;

    match ra.output {
        Some("-") => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&png)?;
            stdout.flush()?;
        }
        other => {
            let path = other
                .map(PathBuf::from)
                .unwrap_or_else(|| default_output(&ra));
            std::fs::write(&path, &png)?;
            tracing::info!("wrote {}", path.display());
        }
    }
    Ok(())
}

fn render_to_png(ra: &RenderArgs<'_>) -> anyhow::Result<Vec<u8>> {
    let req = params::validate(RawParams {
        color: Some(ra.color),
        width: Some(ra.width),
        height: Some(ra.height),
        text: ra.text,
        cross: ra.cross.then_some("x"),
    })?;
    Ok(render::render_png(&req, &RenderOptions::default())?)
}

fn default_output(ra: &RenderArgs<'_>) -> PathBuf {
    let suffix = if ra.cross { "-x" } else { "" };
    PathBuf::from(format!("{}-{}-{}{}.png", ra.color, ra.width, ra.height, suffix))
}
