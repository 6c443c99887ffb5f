use std::{
    fs,
    io::{self, Read, Write},
    path::PathBuf,
};

use flate2::{read::ZlibDecoder, write::ZlibEncoder, Compression};
use log::{debug, trace};
use tempfile::NamedTempFile;

use minigit_core::{
    object::{Id, Object},
    Error, Result,
};

use super::OnDiskRepo;

impl OnDiskRepo {
    /// Path of the loose object file for `id`: `.git/objects/xx/yyyy...`,
    /// where `xx` is the first two hex digits of the ID.
    pub(super) fn loose_object_path(&self, id: &Id) -> PathBuf {
        let hex = id.to_string();
        let (dir_name, file_name) = hex.split_at(2);

        let mut path = self.git_dir.join("objects");
        path.push(dir_name);
        path.push(file_name);
        path
    }

    /// Write an object as a zlib-compressed loose object.
    ///
    /// If the object is already present, nothing is written. Otherwise the
    /// object is compressed into a temporary file in the fan-out directory
    /// and renamed into place, so readers never see a partial object.
    pub(super) fn put_loose_object(&mut self, object: &Object) -> Result<()> {
        let path = self.loose_object_path(object.id());

        if path.exists() {
            trace!("object {} already stored", object.id());
            return Ok(());
        }

        let dir = path.parent().unwrap_or_else(|| self.git_dir.as_path());
        fs::create_dir_all(dir)?;

        let mut temp = NamedTempFile::new_in(dir)?;
        {
            let mut encoder = ZlibEncoder::new(&mut temp, Compression::default());
            encoder.write_all(&object.to_bytes())?;
            encoder.finish()?;
        }

        temp.persist(&path).map_err(|err| err.error)?;

        debug!(
            "wrote {} {} ({} bytes)",
            object.kind(),
            object.id(),
            object.len()
        );
        Ok(())
    }

    /// Read and decompress a loose object.
    ///
    /// The decoded content is hashed again, so a file that was stored under
    /// the wrong name is reported as malformed rather than returned.
    pub(super) fn get_loose_object(&self, id: &Id) -> Result<Object> {
        let path = self.loose_object_path(id);

        let compressed = match fs::read(&path) {
            Ok(compressed) => compressed,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(Error::ObjectNotFound(*id));
            }
            Err(err) => return Err(err.into()),
        };

        let mut raw = Vec::new();
        ZlibDecoder::new(compressed.as_slice())
            .read_to_end(&mut raw)
            .map_err(|source| Error::CorruptObject { id: *id, source })?;

        let object = Object::from_bytes(&raw)?;
        if object.id() != id {
            return Err(Error::MalformedObject(format!(
                "object stored as {} has ID {}",
                id,
                object.id()
            )));
        }

        trace!("read {} {}", object.kind(), id);
        Ok(object)
    }
}
