/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Conversions between rasters and the standard formats the
//! converter understands
use jpeg_decoder::PixelFormat;
use log::{debug, warn};
use narpi::Raster;
use narpi_core::colorspace::ColorSpace;
use png::{BitDepth, ColorType, Transformations};
use zune_core::bit_depth::BitDepth as ZBitDepth;
use zune_core::bytestream::ZCursor;
use zune_core::colorspace::ColorSpace as ZColorSpace;
use zune_core::options::EncoderOptions;
use zune_core::result::DecodingResult;
use zune_ppm::{PPMDecodeErrors, PPMDecoder, PPMEncoder};

use crate::errors::CliErrors;
use crate::file_io::ImageFormat;

/// Quality used for JPEG output
const JPEG_QUALITY: u8 = 100;

/// Decode a PNG, JPEG or binary PPM into an RGB raster
///
/// Alpha is dropped and grayscale is expanded to three equal channels.
pub fn decode_standard_image(bytes: &[u8]) -> Result<Raster, CliErrors> {
    match ImageFormat::guess_format(bytes) {
        Some(ImageFormat::Png) => decode_png(bytes),
        Some(ImageFormat::Jpeg) => decode_jpeg(bytes),
        Some(ImageFormat::Ppm) => decode_ppm(bytes),
        Some(ImageFormat::Narpi) => Err(CliErrors::UnsupportedFormat(
            "NARPI is not a standard format".to_string()
        )),
        None => Err(CliErrors::UnsupportedFormat(
            "could not detect the input format".to_string()
        ))
    }
}

/// Encode `raster` as a PNG, JPEG or binary PPM
///
/// JPEG output is written at quality 100 and is therefore still lossy.
pub fn encode_standard_image(raster: &Raster, format: ImageFormat) -> Result<Vec<u8>, CliErrors> {
    match format {
        ImageFormat::Png => encode_png(raster),
        ImageFormat::Jpeg => encode_jpeg(raster),
        ImageFormat::Ppm => encode_ppm(raster),
        other => Err(CliErrors::UnsupportedFormat(format!(
            "{other:?} cannot be written as a standard image"
        )))
    }
}

/// Reduce interleaved pixels in `colorspace` to RGB
fn to_rgb(pixels: &[u8], colorspace: ColorSpace) -> Vec<u8> {
    let components = colorspace.num_components();
    let mut out = Vec::with_capacity(pixels.len() / components * 3);

    for pixel in pixels.chunks_exact(components) {
        if colorspace.is_grayscale() {
            out.extend_from_slice(&[pixel[0]; 3]);
        } else {
            out.extend_from_slice(&pixel[..3]);
        }
    }
    if colorspace.has_alpha() {
        debug!("Dropping alpha channel");
    }
    out
}

fn decode_png(bytes: &[u8]) -> Result<Raster, CliErrors> {
    let mut decoder = png::Decoder::new(bytes);
    decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);

    let mut reader = decoder.read_info()?;
    let mut pixels = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut pixels)?;
    pixels.truncate(info.buffer_size());

    let colorspace = match info.color_type {
        ColorType::Grayscale => ColorSpace::Luma,
        ColorType::GrayscaleAlpha => ColorSpace::LumaA,
        ColorType::Rgb => ColorSpace::RGB,
        ColorType::Rgba => ColorSpace::RGBA,
        ColorType::Indexed => {
            return Err(CliErrors::UnsupportedFormat(
                "palette PNG was not expanded".to_string()
            ))
        }
    };
    debug!("PNG {}x{} {:?}", info.width, info.height, colorspace);

    let rgb = to_rgb(&pixels, colorspace);
    Ok(Raster::new(info.width as usize, info.height as usize, rgb)?)
}

fn decode_jpeg(bytes: &[u8]) -> Result<Raster, CliErrors> {
    let mut decoder = jpeg_decoder::Decoder::new(bytes);
    let pixels = decoder.decode()?;
    let info = decoder
        .info()
        .ok_or(CliErrors::GenericString("JPEG has no frame header".to_string()))?;

    let rgb = match info.pixel_format {
        PixelFormat::RGB24 => pixels,
        PixelFormat::L8 => to_rgb(&pixels, ColorSpace::Luma),
        PixelFormat::L16 => {
            warn!("Reducing 16 bit JPEG samples to 8 bits");
            // big endian samples, keep the high byte
            let high: Vec<u8> = pixels.chunks_exact(2).map(|sample| sample[0]).collect();
            to_rgb(&high, ColorSpace::Luma)
        }
        other => {
            return Err(CliErrors::UnsupportedFormat(format!(
                "JPEG pixel format {other:?}"
            )))
        }
    };
    debug!("JPEG {}x{}", info.width, info.height);

    Ok(Raster::new(usize::from(info.width), usize::from(info.height), rgb)?)
}

fn encode_png(raster: &Raster) -> Result<Vec<u8>, CliErrors> {
    let mut out = Vec::new();
    let mut encoder = png::Encoder::new(&mut out, raster.width() as u32, raster.height() as u32);
    encoder.set_color(ColorType::Rgb);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder.write_header()?;
    writer.write_image_data(raster.pixels())?;
    writer.finish()?;

    Ok(out)
}

fn encode_jpeg(raster: &Raster) -> Result<Vec<u8>, CliErrors> {
    let too_large = |dimension: usize| {
        CliErrors::UnsupportedFormat(format!("JPEG cannot store dimension {dimension}"))
    };
    let width = u16::try_from(raster.width()).map_err(|_| too_large(raster.width()))?;
    let height = u16::try_from(raster.height()).map_err(|_| too_large(raster.height()))?;

    let mut out = Vec::new();
    let encoder = jpeg_encoder::Encoder::new(&mut out, JPEG_QUALITY);
    encoder.encode(raster.pixels(), width, height, jpeg_encoder::ColorType::Rgb)?;

    Ok(out)
}

fn encode_ppm(raster: &Raster) -> Result<Vec<u8>, CliErrors> {
    let options = EncoderOptions::new(
        raster.width(),
        raster.height(),
        ZColorSpace::RGB,
        ZBitDepth::Eight
    );
    let mut out = Vec::with_capacity(raster.pixels().len() + 32);

    PPMEncoder::new(raster.pixels(), options)
        .encode(&mut out)
        .map_err(|err| CliErrors::PpmEncode(format!("{err:?}")))?;

    Ok(out)
}

fn decode_ppm(bytes: &[u8]) -> Result<Raster, CliErrors> {
    let ppm_error = |err: PPMDecodeErrors| CliErrors::PpmDecode(format!("{err:?}"));

    let mut decoder = PPMDecoder::new(ZCursor::new(bytes));
    let pixels = decoder.decode().map_err(ppm_error)?;

    let (width, height) = decoder
        .dimensions()
        .ok_or(CliErrors::GenericString("PPM headers not decoded".to_string()))?;

    let colorspace = match decoder.colorspace() {
        Some(ZColorSpace::RGB) => ColorSpace::RGB,
        Some(ZColorSpace::RGBA) => ColorSpace::RGBA,
        Some(ZColorSpace::Luma) => ColorSpace::Luma,
        Some(ZColorSpace::LumaA) => ColorSpace::LumaA,
        other => {
            return Err(CliErrors::UnsupportedFormat(format!(
                "PPM colorspace {other:?}"
            )))
        }
    };
    let samples = match pixels {
        DecodingResult::U8(samples) => samples,
        DecodingResult::U16(samples) => {
            warn!("Reducing 16 bit PPM samples to 8 bits");
            samples.iter().map(|sample| (sample >> 8) as u8).collect()
        }
        _ => {
            return Err(CliErrors::UnsupportedFormat(
                "floating point PPM samples".to_string()
            ))
        }
    };
    debug!("PPM {width}x{height} {colorspace:?}");

    let rgb = to_rgb(&samples, colorspace);
    Ok(Raster::new(width, height, rgb)?)
}
