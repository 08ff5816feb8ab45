mod image_codec_fir;

pub use image_codec_fir::FirImageCodec;
