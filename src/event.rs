use crate::attachment::Attachment;
use crate::qr::QrImage;

/// Completions reported by background jobs. Each carries the generation the
/// job was started under so stale results can be dropped instead of
/// clobbering newer state.
#[derive(Debug, Clone)]
pub enum AppEvent {
    AttachmentLoaded {
        generation: u64,
        attachment: Attachment,
    },
    AttachmentFailed {
        generation: u64,
        message: String,
    },
    QrEncoded {
        generation: u64,
        image: QrImage,
    },
    QrFailed {
        generation: u64,
        message: String,
    },
}
