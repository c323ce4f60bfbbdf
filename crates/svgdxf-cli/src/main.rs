use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use svgdxf::{
    Composition, ConvertOptions, LogSink, OutputFormat, output_file_name, svg_to_dxf_with,
};

fn usage() -> &'static str {
    "usage: svgdxf [--format dxf|pdf|both] [--out-dir DIR] [--additive] [--fallback-max-y N] <input.svg>..."
}

#[derive(Debug)]
struct Args {
    formats: Vec<OutputFormat>,
    out_dir: Option<PathBuf>,
    options: ConvertOptions,
    inputs: Vec<PathBuf>,
}

fn parse_args(argv: &[String]) -> Result<Args> {
    let mut args = Args {
        formats: vec![OutputFormat::Dxf],
        out_dir: None,
        options: ConvertOptions::default(),
        inputs: Vec::new(),
    };

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => bail!(usage()),
            "--format" => {
                let Some(fmt) = it.next() else {
                    bail!(usage());
                };
                args.formats = match fmt.trim().to_ascii_lowercase().as_str() {
                    "dxf" => vec![OutputFormat::Dxf],
                    "pdf" => vec![OutputFormat::Pdf],
                    "both" => vec![OutputFormat::Dxf, OutputFormat::Pdf],
                    _ => bail!("unknown format {fmt:?}\n{}", usage()),
                };
            }
            "--out-dir" => {
                let Some(dir) = it.next() else {
                    bail!(usage());
                };
                args.out_dir = Some(PathBuf::from(dir));
            }
            "--additive" => args.options.composition = Composition::Additive,
            "--fallback-max-y" => {
                let Some(value) = it.next() else {
                    bail!(usage());
                };
                let max_y = value
                    .parse::<f64>()
                    .map_err(|_| anyhow!("invalid --fallback-max-y {value:?}"))?;
                if !max_y.is_finite() {
                    bail!("invalid --fallback-max-y {value:?}");
                }
                args.options.fallback_max_y = Some(max_y);
            }
            flag if flag.starts_with("--") => bail!("unknown option {flag}\n{}", usage()),
            input => args.inputs.push(PathBuf::from(input)),
        }
    }

    if args.inputs.is_empty() {
        bail!(usage());
    }
    Ok(args)
}

fn render(svg: &str, format: OutputFormat, options: &ConvertOptions) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Dxf => Ok(svg_to_dxf_with(svg, options, &mut LogSink)?.into_bytes()),
        #[cfg(feature = "pdf")]
        OutputFormat::Pdf => Ok(svgdxf::svg_to_pdf(svg)?),
        #[cfg(not(feature = "pdf"))]
        OutputFormat::Pdf => bail!("this build has no PDF support"),
    }
}

fn convert_file(input: &Path, args: &Args) -> Result<()> {
    let svg = fs::read_to_string(input).with_context(|| format!("reading {}", input.display()))?;
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| anyhow!("{} has no usable file name", input.display()))?;
    let dir = match &args.out_dir {
        Some(dir) => dir.as_path(),
        None => input.parent().unwrap_or(Path::new(".")),
    };

    for &format in &args.formats {
        let bytes = render(&svg, format, &args.options)
            .with_context(|| format!("converting {} to {format}", input.display()))?;
        let out = dir.join(output_file_name(stem, format));
        fs::write(&out, bytes).with_context(|| format!("writing {}", out.display()))?;
        tracing::info!(input = %input.display(), output = %out.display(), "wrote");
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let argv: Vec<String> = std::env::args().collect();
    let args = parse_args(&argv)?;

    if let Some(dir) = &args.out_dir {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    for input in &args.inputs {
        convert_file(input, &args)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        std::iter::once("svgdxf")
            .chain(args.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn defaults_to_dxf() {
        let args = parse_args(&argv(&["a.svg"])).unwrap();
        assert_eq!(args.formats, vec![OutputFormat::Dxf]);
        assert_eq!(args.options, ConvertOptions::default());
        assert_eq!(args.inputs, vec![PathBuf::from("a.svg")]);
    }

    #[test]
    fn all_flags() {
        let args = parse_args(&argv(&[
            "--format",
            "both",
            "--out-dir",
            "out",
            "--additive",
            "--fallback-max-y",
            "1000",
            "a.svg",
            "b.svg",
        ]))
        .unwrap();
        assert_eq!(args.formats, vec![OutputFormat::Dxf, OutputFormat::Pdf]);
        assert_eq!(args.out_dir, Some(PathBuf::from("out")));
        assert_eq!(args.options.composition, Composition::Additive);
        assert_eq!(args.options.fallback_max_y, Some(1000.0));
        assert_eq!(args.inputs.len(), 2);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_args(&argv(&[])).is_err());
        assert!(parse_args(&argv(&["--format", "png", "a.svg"])).is_err());
        assert!(parse_args(&argv(&["--bogus", "a.svg"])).is_err());
        assert!(parse_args(&argv(&["--fallback-max-y", "x", "a.svg"])).is_err());
    }
}
