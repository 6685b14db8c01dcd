//! Convert an image file into printer image commands.
//!
//! ```bash
//! # ZPL graphic field on stdout
//! thermal-raster logo.png --language zpl
//!
//! # EPL2 at dot 50,30 written to a file
//! thermal-raster logo.png --language epl2 -x 50 -y 30 --output logo.epl
//! ```

use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
};

use clap::Parser;
use log::{debug, error};

use thermal_raster::{encode, Charset, EncodeConfig, Error, PrinterLanguage, QuantizationMethod};

#[derive(Parser, Debug)]
#[command(name = "thermal-raster")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Image to convert (PNG, JPEG, BMP, ...)
    image: PathBuf,

    /// Printer language: escp, escp2, zpl, zplii, epl, epl2 or cpcl
    #[arg(short, long)]
    language: PrinterLanguage,

    /// Quantization method: black, luma or alpha
    #[arg(short, long, default_value = "luma")]
    method: QuantizationMethod,

    #[arg(long, default_value_t = 127)]
    luma_threshold: u8,

    #[arg(long, default_value_t = 127)]
    alpha_threshold: u8,

    /// Horizontal position in dots (EPL, CPCL)
    #[arg(short, default_value_t = 0)]
    x: u32,

    /// Vertical position in dots (EPL, CPCL)
    #[arg(short, default_value_t = 0)]
    y: u32,

    /// ESC/P bit image mode, 32 single density, 33 double density
    #[arg(long, default_value_t = thermal_raster::SINGLE_DENSITY)]
    dot_density: u8,

    /// Charset for the text parts of the command
    #[arg(long, default_value = "UTF-8")]
    charset: Charset,

    /// Write commands to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}:{}] {} - {}",
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.level(),
                record.args()
            )
        })
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        error!("{:?}", err);
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Error> {
    let image = image::open(&cli.image)?.to_rgba8();

    let config = EncodeConfig::new(cli.language)
        .quantization(cli.method)
        .luma_threshold(cli.luma_threshold)
        .alpha_threshold(cli.alpha_threshold)
        .position(cli.x, cli.y)
        .dot_density(cli.dot_density)
        .charset(cli.charset);
    debug!("{:?}", config);

    let commands = encode(&image, config)?;

    match cli.output {
        Some(path) => fs::write(path, &commands)?,
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(&commands)?;
            handle.flush()?;
        }
    }
    Ok(())
}
