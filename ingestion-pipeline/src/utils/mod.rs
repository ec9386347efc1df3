pub mod chunking;
pub mod ocr;
pub mod ocr_quality;
