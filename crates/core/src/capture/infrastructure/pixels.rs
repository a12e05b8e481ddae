use crate::shared::frame::Frame;

/// Copies an RGB24 ffmpeg frame into a tightly packed [`Frame`].
///
/// ffmpeg rows may carry padding (stride > width*3), which is dropped here.
pub(crate) fn rgb_frame_from_video(rgb_frame: &ffmpeg_next::util::frame::video::Video) -> Frame {
    let width = rgb_frame.width();
    let height = rgb_frame.height();
    let stride = rgb_frame.stride(0);
    let data = rgb_frame.data(0);
    let row_len = width as usize * 3;

    let mut pixels = Vec::with_capacity(row_len * height as usize);
    for row in 0..height as usize {
        let row_start = row * stride;
        pixels.extend_from_slice(&data[row_start..row_start + row_len]);
    }
    Frame::new(pixels, width, height, 3)
}

/// Pulls one decoded picture out of `decoder`, if it has one ready, and
/// converts it to RGB24.
pub(crate) fn receive_rgb_frame(
    decoder: &mut ffmpeg_next::decoder::Video,
    scaler: &mut ffmpeg_next::software::scaling::Context,
) -> Result<Option<Frame>, ffmpeg_next::Error> {
    let mut decoded = ffmpeg_next::util::frame::video::Video::empty();
    if decoder.receive_frame(&mut decoded).is_err() {
        return Ok(None);
    }
    let mut rgb = ffmpeg_next::util::frame::video::Video::empty();
    scaler.run(&decoded, &mut rgb)?;
    Ok(Some(rgb_frame_from_video(&rgb)))
}

/// Builds a scaler that converts the decoder's native format to RGB24 at the
/// same size.
pub(crate) fn rgb_scaler(
    decoder: &ffmpeg_next::decoder::Video,
) -> Result<ffmpeg_next::software::scaling::Context, ffmpeg_next::Error> {
    ffmpeg_next::software::scaling::Context::get(
        decoder.format(),
        decoder.width(),
        decoder.height(),
        ffmpeg_next::format::Pixel::RGB24,
        decoder.width(),
        decoder.height(),
        ffmpeg_next::software::scaling::Flags::BILINEAR,
    )
}
