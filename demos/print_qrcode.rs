use image::{GenericImage, Rgba, RgbaImage};
use qrcode::QrCode;
use std::{env, fs, path::PathBuf};
use thermal_raster::{Encoder, EncodeConfig, PrinterLanguage, QuantizationMethod};

//
// cargo run --example print_qrcode [TEXT]
//
// Writes one command file per printer language into $OUTPUT_DIR (default: ./out).
//

fn print_usage() {
    println!("Usage: cargo run --example print_qrcode [TEXT]");
    println!("Renders TEXT as a QR code and writes the image command for every");
    println!("printer language into OUTPUT_DIR (set it in .env, default ./out).");
}

fn main() {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            use std::io::Write;
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

    let args: Vec<String> = env::args().collect();

    let text = if args.len() > 1 {
        let arg = &args[1];

        if arg == "--help" || arg == "-h" {
            print_usage();
            return;
        }
        arg.clone()
    } else {
        "12345-1".to_string()
    };

    let out_dir = PathBuf::from(env::var("OUTPUT_DIR").unwrap_or_else(|_| "out".to_string()));
    fs::create_dir_all(&out_dir).unwrap();

    let qrcode = QrCode::new(text.as_bytes()).unwrap();
    let qrcode: RgbaImage = qrcode
        .render::<Rgba<u8>>()
        .quiet_zone(false)
        .min_dimensions(100, 100)
        .build();

    // Odd width on purpose so EPL has to pad the label.
    let (width, height) = qrcode.dimensions();
    let mut label = RgbaImage::from_pixel(width + 3, height, Rgba([255, 255, 255, 255]));
    label.copy_from(&qrcode, 0, 0).unwrap();

    println!("Label is {}x{} dots", label.width(), label.height());

    for language in PrinterLanguage::ALL.iter() {
        let config = EncodeConfig::new(*language)
            .quantization(QuantizationMethod::CheckLuma)
            .position(20, 20);

        let mut encoder = Encoder::new(config);
        match encoder.image_command(&label) {
            Ok(commands) => {
                let path = out_dir.join(format!("qrcode.{}", language.name().to_lowercase()));
                fs::write(&path, &commands).unwrap();
                println!("{:>6}: {} bytes -> {}", language.name(), commands.len(), path.display());
            }
            Err(err) => println!("ERROR {:#?}", err),
        }
    }
}
