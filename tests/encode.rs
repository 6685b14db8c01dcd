use image::{Rgba, RgbaImage};
use pretty_assertions::assert_eq;
use thermal_raster::{
    classify, encode, pack, pad_to_multiple_of_8, Charset, EncodeConfig, Error, Monochrome,
    PrinterLanguage, QuantizationConfig, QuantizationMethod,
};

const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Deterministic speckled test image.
fn speckled(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        if (x * 7 + y * 13) % 5 < 2 {
            BLACK
        } else {
            WHITE
        }
    })
}

fn ascii_prefix(bytes: &[u8], fields: usize) -> (String, usize) {
    // Returns the text up to and including the `fields`-th comma.
    let mut seen = 0;
    for (i, b) in bytes.iter().enumerate() {
        if *b == b',' {
            seen += 1;
            if seen == fields {
                return (String::from_utf8(bytes[..=i].to_vec()).unwrap(), i + 1);
            }
        }
    }
    panic!("not enough fields in {:?}", bytes);
}

#[test]
fn packed_length_is_floor_of_dot_count() {
    let config = QuantizationConfig::default();
    for (width, height) in [(1, 1), (3, 5), (7, 9), (8, 8), (13, 3), (100, 1)] {
        let image = speckled(width, height);
        let grid = classify(&image, &config, false);
        assert_eq!(grid.len(), (width * height) as usize);
        assert_eq!(pack(&grid).len(), (width * height / 8) as usize);
    }
}

#[test]
fn padding_an_aligned_image_changes_nothing() {
    let image = speckled(24, 5);
    let padded = pad_to_multiple_of_8(&image).unwrap();
    assert_eq!(padded.dimensions(), image.dimensions());
    assert_eq!(padded.as_raw(), image.as_raw());
}

#[test]
fn epl_black_square() {
    let image = RgbaImage::from_pixel(8, 8, BLACK);
    let config = EncodeConfig::new(PrinterLanguage::Epl).position(0, 0);
    let bytes = encode(&image, config).unwrap();

    // EPL uses 0 for black, so a black square is all zero bytes
    let mut expected = b"GW0,0,1,8,".to_vec();
    expected.extend_from_slice(&[0x00; 8]);
    assert_eq!(bytes, expected);
}

#[test]
fn epl_width_is_padded_and_payload_sized() {
    for width in [1, 5, 8, 9, 15, 17, 33] {
        let image = speckled(width, 6);
        let config = EncodeConfig::new(PrinterLanguage::Epl2).position(12, 34);
        let bytes = encode(&image, config).unwrap();

        let (header, start) = ascii_prefix(&bytes, 4);
        let fields: Vec<u32> = header
            .trim_start_matches("GW")
            .trim_end_matches(',')
            .split(',')
            .map(|f| f.parse().unwrap())
            .collect();
        let padded = (width + 7) / 8 * 8;

        assert_eq!(fields, vec![12, 34, padded / 8, 6]);
        assert_eq!(bytes.len() - start, (padded / 8 * 6) as usize);
    }
}

#[test]
fn epl_padding_prints_as_white() {
    // A 1 dot wide black line becomes 0b0111_1111 per row
    let image = RgbaImage::from_pixel(1, 3, BLACK);
    let bytes = encode(&image, EncodeConfig::new(PrinterLanguage::Epl)).unwrap();
    assert_eq!(&bytes[..], b"GW0,0,1,3,\x7F\x7F\x7F");
}

#[test]
fn zpl_hex_round_trips_to_packed_bytes() {
    let image = speckled(20, 7);
    let config = EncodeConfig::new(PrinterLanguage::Zpl);
    let bitmap = Monochrome::new(&image, &config.quantization_config(), PrinterLanguage::Zpl).unwrap();

    let text = String::from_utf8(encode(&image, config).unwrap()).unwrap();
    let parts: Vec<&str> = text.splitn(5, ',').collect();
    assert_eq!(parts[0], "^GFA");

    let byte_len: usize = parts[1].parse().unwrap();
    assert_eq!(parts[2], parts[1]);
    assert_eq!(parts[3], (byte_len / 7).to_string());

    let hex_text = parts[4];
    assert_eq!(hex_text.len() % 2, 0);
    assert_eq!(hex_text.len(), 2 * bitmap.packed().len());
    assert_eq!(hex_text, hex_text.to_uppercase());
    assert_eq!(hex::decode(hex_text).unwrap(), bitmap.packed());
    assert_eq!(byte_len, bitmap.packed().len());
}

#[test]
fn cpcl_hex_round_trips_to_packed_bytes() {
    let image = speckled(16, 9);
    let config = EncodeConfig::new(PrinterLanguage::Cpcl)
        .position(3, 4)
        .quantization(QuantizationMethod::CheckBlack);
    let bitmap = Monochrome::new(&image, &config.quantization_config(), PrinterLanguage::Cpcl).unwrap();

    let text = String::from_utf8(encode(&image, config).unwrap()).unwrap();
    let parts: Vec<&str> = text.split(' ').collect();
    assert_eq!(&parts[..5], &["EG", "2", "9", "3", "4"]);
    assert_eq!(parts[5].len(), 2 * bitmap.packed().len());
    assert_eq!(hex::decode(parts[5]).unwrap(), bitmap.packed());
}

#[test]
fn escp_band_count_and_framing() {
    for height in [1, 23, 24, 25, 48, 49, 100] {
        let width = 5;
        let image = speckled(width, height);
        let bytes = encode(&image, EncodeConfig::new(PrinterLanguage::EscP)).unwrap();

        let bands = ((height + 23) / 24) as usize;
        let band_len = 5 + width as usize * 3 + 1;
        assert_eq!(bytes.len(), 3 + bands * band_len + 3, "height {}", height);
        assert_eq!(&bytes[..3], &[0x1B, 0x33, 24]);
        assert_eq!(&bytes[bytes.len() - 3..], &[0x1B, 0x33, 30]);

        for band in 0..bands {
            let start = 3 + band * band_len;
            assert_eq!(&bytes[start..start + 5], &[0x1B, 0x2A, 32, 5, 0]);
            assert_eq!(bytes[start + band_len - 1], 0x0A);
        }
    }
}

#[test]
fn escp2_single_column_alternating_rows() {
    let image = RgbaImage::from_fn(1, 24, |_, y| if y % 2 == 0 { BLACK } else { WHITE });
    let config = EncodeConfig::new(PrinterLanguage::EscP2).dot_density(32);
    let bytes = encode(&image, config).unwrap();

    let expected: Vec<u8> = vec![
        0x1B, 0x33, 24, // line spacing 24 dots
        0x1B, 0x2A, 32, 0x01, 0x00, // bit image, 1 column
        0xAA, 0xAA, 0xAA, // rows 0, 2, 4, ... set
        0x0A, // next band
        0x1B, 0x33, 30, // line spacing back to 30 dots
    ];
    assert_eq!(bytes, expected);
}

#[test]
fn escp_second_band_reads_lower_rows() {
    // Only row 24 is black, so it shows up in the second band's first byte
    let image = RgbaImage::from_fn(2, 30, |x, y| if y == 24 && x == 1 { BLACK } else { WHITE });
    let bytes = encode(&image, EncodeConfig::new(PrinterLanguage::EscP)).unwrap();

    let band_len = 5 + 2 * 3 + 1;
    let first = &bytes[3 + 5..3 + 5 + 6];
    let second = &bytes[3 + band_len + 5..3 + band_len + 5 + 6];
    assert_eq!(first, &[0, 0, 0, 0, 0, 0]);
    assert_eq!(second, &[0, 0, 0, 0x80, 0, 0]);
}

#[test]
fn quantization_methods_change_output() {
    let image = RgbaImage::from_fn(8, 1, |x, _| match x {
        0 => Rgba([0, 0, 0, 255]),
        1 => Rgba([10, 0, 0, 255]),
        2 => Rgba([90, 90, 90, 255]),
        3 => Rgba([0, 0, 0, 60]),
        4 => Rgba([255, 255, 255, 200]),
        _ => Rgba([255, 255, 255, 0]),
    });

    let bytes = |method| {
        let config = EncodeConfig::new(PrinterLanguage::Cpcl).quantization(method);
        String::from_utf8(encode(&image, config).unwrap()).unwrap()
    };

    assert_eq!(bytes(QuantizationMethod::CheckBlack), "EG 1 1 0 0 80");
    assert_eq!(bytes(QuantizationMethod::CheckLuma), "EG 1 1 0 0 E0");
    assert_eq!(bytes(QuantizationMethod::CheckAlpha), "EG 1 1 0 0 E8");
}

#[test]
fn unsupported_language_names_the_request() {
    let result = "PCL6".parse::<PrinterLanguage>();
    match result {
        Err(Error::UnsupportedFormat(name)) => assert_eq!(name, "PCL6"),
        other => panic!("expected unsupported format, got {:?}", other),
    }

    let message = "DPL".parse::<PrinterLanguage>().unwrap_err().to_string();
    assert_eq!(message, "DPL image conversion is not yet supported");
}

#[test]
fn unknown_charset_is_an_encoding_error() {
    assert!(matches!("KOI8-R".parse::<Charset>(), Err(Error::Encoding { .. })));
}

#[test]
fn charset_does_not_touch_raw_epl_bytes() {
    let image = speckled(16, 4);
    let utf8 = encode(&image, EncodeConfig::new(PrinterLanguage::Epl2)).unwrap();
    let cp437 = encode(
        &image,
        EncodeConfig::new(PrinterLanguage::Epl2).charset(Charset::Ibm437),
    )
    .unwrap();
    assert_eq!(utf8, cp437);
}

#[test]
fn degenerate_images_encode_to_nothing() {
    for language in PrinterLanguage::ALL.iter() {
        let config = EncodeConfig::new(*language);
        assert_eq!(encode(&RgbaImage::new(0, 0), config).unwrap(), Vec::<u8>::new());
        assert_eq!(encode(&RgbaImage::new(0, 24), config).unwrap(), Vec::<u8>::new());
        assert_eq!(encode(&RgbaImage::new(16, 0), config).unwrap(), Vec::<u8>::new());
    }
}

#[test]
fn dynamic_images_are_accepted() {
    let image = image::DynamicImage::ImageRgba8(RgbaImage::from_pixel(8, 1, BLACK));
    let bytes = encode(&image, EncodeConfig::new(PrinterLanguage::Zpl)).unwrap();
    assert_eq!(bytes, b"^GFA,1,1,1,FF".to_vec());
}
