use std::io::Cursor;

use super::*;

fn png_bytes(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    let pixels = rgba
        .iter()
        .copied()
        .cycle()
        .take(width as usize * height as usize * 4)
        .collect();
    let img = image::RgbaImage::from_raw(width, height, pixels).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_raster_png_dimensions_and_premul() {
    let buf = png_bytes(1, 1, [100, 50, 200, 128]);
    let prepared = decode_raster_image(&buf).unwrap();
    assert_eq!(prepared.width, 1);
    assert_eq!(prepared.height, 1);
    assert_eq!(
        prepared.rgba8_premul.as_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_raster_rejects_garbage() {
    assert!(matches!(
        decode_raster_image(b"not an image"),
        Err(crate::SquarizeError::Decode(_))
    ));
}

#[tokio::test]
async fn normalize_raster_reports_natural_dimensions() {
    let file = RawFile::new(png_bytes(3, 2, [9, 9, 9, 255]), "image/png", "tiny.png");
    let asset = normalize_raster(file).await.unwrap();
    assert_eq!(asset.metadata.width, 3);
    assert_eq!(asset.metadata.height, 2);
    assert_eq!(asset.metadata.name, "tiny.png");
    assert!(asset.resource.is_none());
    assert!(matches!(asset.renderable, Renderable::Raster(_)));
}

#[test]
fn normalize_vector_reads_declared_dimensions() {
    let svg = br#"<svg xmlns="http://www.w3.org/2000/svg" width="40" height="20"></svg>"#;
    let mut resources = ResourceRegistry::new();
    let asset =
        normalize_vector(RawFile::new(&svg[..], SVG_MEDIA_TYPE, "box.svg"), &mut resources)
            .unwrap();

    assert_eq!(asset.metadata.width, 40);
    assert_eq!(asset.metadata.height, 20);
    let id = asset.resource.expect("vector assets allocate a resource");
    assert!(resources.get(id).unwrap().contains("<svg"));
    assert_eq!(resources.len(), 1);
}

#[test]
fn normalize_vector_defaults_missing_or_non_numeric_dimensions() {
    let mut resources = ResourceRegistry::new();

    let bare = br#"<svg xmlns="http://www.w3.org/2000/svg"></svg>"#;
    let asset =
        normalize_vector(RawFile::new(&bare[..], SVG_MEDIA_TYPE, "bare.svg"), &mut resources)
            .unwrap();
    assert_eq!(asset.metadata.width, SVG_DEFAULT_WIDTH);
    assert_eq!(asset.metadata.height, SVG_DEFAULT_HEIGHT);

    let odd = br#"<svg xmlns="http://www.w3.org/2000/svg" width="wide" height="12px"></svg>"#;
    let asset =
        normalize_vector(RawFile::new(&odd[..], SVG_MEDIA_TYPE, "odd.svg"), &mut resources)
            .unwrap();
    assert_eq!(asset.metadata.width, SVG_DEFAULT_WIDTH);
    assert_eq!(asset.metadata.height, 12);
}

#[test]
fn normalize_vector_rejects_broken_markup() {
    let mut resources = ResourceRegistry::new();
    let err = normalize_vector(
        RawFile::new(&b"<svg"[..], SVG_MEDIA_TYPE, "broken.svg"),
        &mut resources,
    )
    .unwrap_err();
    assert!(matches!(err, crate::SquarizeError::Decode(_)));
    // Nothing leaks when the parse fails.
    assert!(resources.is_empty());
}

#[test]
fn dimension_parse_takes_leading_integer() {
    assert_eq!(parse_dimension(Some("300"), 7), 300);
    assert_eq!(parse_dimension(Some("  300px"), 7), 300);
    assert_eq!(parse_dimension(Some("300.9"), 7), 300);
    assert_eq!(parse_dimension(Some("px300"), 7), 7);
    assert_eq!(parse_dimension(Some(""), 7), 7);
    assert_eq!(parse_dimension(None, 7), 7);
}

#[tokio::test]
async fn normalize_branches_on_declared_type() {
    let mut resources = ResourceRegistry::new();
    let svg = br#"<svg xmlns="http://www.w3.org/2000/svg" width="1" height="1"></svg>"#;
    let vector = normalize(RawFile::new(&svg[..], SVG_MEDIA_TYPE, "a.svg"), &mut resources)
        .await
        .unwrap();
    assert!(matches!(vector.renderable, Renderable::Vector(_)));

    let raster = normalize(
        RawFile::new(png_bytes(1, 1, [0, 0, 0, 255]), "image/png", "a.png"),
        &mut resources,
    )
    .await
    .unwrap();
    assert!(matches!(raster.renderable, Renderable::Raster(_)));
}
