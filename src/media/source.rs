use std::fs::File;
use std::path::{Path, PathBuf};

use log::debug;
use symphonia::core::formats::{FormatOptions, FormatReader};
use symphonia::core::io::{MediaSource, MediaSourceStream};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::error::{io_status, MediaError, STATUS_GENERIC};
use crate::media::platform;

/// A resolved media resource: an identified format reader plus the source
/// characteristics captured while opening it.
pub(crate) struct ResolvedSource {
    pub format: Box<dyn FormatReader>,
    pub seekable: bool,
}

/// Translate a URL (or plain path) into a local filesystem path.
///
/// Only `file` URLs are supported; any other scheme cannot be resolved into
/// a decodable source.
pub(crate) fn locate(url: &str) -> Result<PathBuf, MediaError> {
    if let Some(rest) = url.strip_prefix("file://") {
        // file:///path/to/x keeps the leading slash of the path component.
        // A host component (file://host/path) cannot be resolved locally.
        if !rest.starts_with('/') {
            return Err(MediaError::unsupported(
                format!("Unsupported file URL with host component '{}'", url),
                STATUS_GENERIC,
            ));
        }
        return Ok(PathBuf::from(rest));
    }
    if let Some(scheme_end) = url.find("://") {
        return Err(MediaError::unsupported(
            format!("Unsupported URL scheme '{}'", &url[..scheme_end]),
            STATUS_GENERIC,
        ));
    }
    Ok(PathBuf::from(url))
}

/// Open the resource read-only and wrap it as a media source stream.
///
/// Path/file-not-found failures surface as `FileNotFound`; any other open
/// failure means the resource cannot be used as a source.
pub(crate) fn open_source(path: &Path) -> Result<(MediaSourceStream, bool), MediaError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => MediaError::not_found(path.display().to_string()),
        _ => MediaError::unsupported(
            format!("Failed to open source '{}': {}", path.display(), e),
            io_status(&e),
        ),
    })?;
    let seekable = file.is_seekable();
    let stream = MediaSourceStream::new(Box::new(file), Default::default());
    Ok((stream, seekable))
}

/// Resolve a URL into an identified format reader.
///
/// The file extension is passed along only as a hint; identification is done
/// by content, so an extension/format mismatch is tolerated.
pub(crate) fn resolve(url: &str) -> Result<ResolvedSource, MediaError> {
    let path = locate(url)?;
    let (stream, seekable) = open_source(&path)?;

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = platform::runtime()
        .probe()
        .format(
            &hint,
            stream,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| {
            MediaError::unsupported(
                format!("Failed to identify source '{}': {}", url, e),
                STATUS_GENERIC,
            )
        })?;

    debug!("resolved source '{}' (seekable: {})", url, seekable);
    Ok(ResolvedSource {
        format: probed.format,
        seekable,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_locate_plain_path() {
        assert_eq!(locate("/music/a.flac").unwrap(), PathBuf::from("/music/a.flac"));
        assert_eq!(locate("relative.wav").unwrap(), PathBuf::from("relative.wav"));
    }

    #[test]
    fn test_locate_file_url() {
        assert_eq!(
            locate("file:///music/a.flac").unwrap(),
            PathBuf::from("/music/a.flac")
        );
    }

    #[test]
    fn test_locate_rejects_host_form_file_url() {
        let err = locate("file://nas/share/a.wav").unwrap_err();
        assert!(matches!(err, MediaError::UnsupportedFormat { .. }));
        assert!(format!("{}", err).contains("host component"));
    }

    #[test]
    fn test_locate_rejects_other_schemes() {
        let err = locate("https://example.com/a.mp3").unwrap_err();
        assert!(matches!(err, MediaError::UnsupportedFormat { .. }));
        assert!(format!("{}", err).contains("https"));
    }

    #[test]
    fn test_open_source_missing_file_is_not_found() {
        let err = open_source(Path::new("/definitely/not/here.wav"))
            .map(|_| ())
            .unwrap_err();
        assert!(matches!(err, MediaError::FileNotFound { .. }));
    }

    #[test]
    fn test_open_source_reports_seekable_file() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"RIFF").unwrap();
        let (_stream, seekable) = open_source(tmp.path()).unwrap();
        assert!(seekable);
    }

    #[test]
    fn test_resolve_garbage_is_unsupported() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(&[0u8; 64]).unwrap();
        let err = resolve(tmp.path().to_str().unwrap()).map(|_| ()).unwrap_err();
        assert!(matches!(err, MediaError::UnsupportedFormat { .. }));
    }
}
