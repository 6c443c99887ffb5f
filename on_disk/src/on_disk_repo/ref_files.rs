use std::{fs, io, path::PathBuf};

use log::debug;

use minigit_core::{
    refs::{self, RefTarget},
    Result,
};

use super::OnDiskRepo;

impl OnDiskRepo {
    fn ref_path(&self, name: &str) -> PathBuf {
        name.split('/')
            .fold(self.git_dir.clone(), |path, segment| path.join(segment))
    }

    pub(super) fn read_ref_file(&self, name: &str) -> Result<Option<RefTarget>> {
        refs::check_name(name)?;

        match fs::read(self.ref_path(name)) {
            Ok(content) => RefTarget::parse(name, &content).map(Some),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    pub(super) fn write_ref_file(&mut self, name: &str, target: &RefTarget) -> Result<()> {
        refs::check_name(name)?;

        let path = self.ref_path(name);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&path, target.to_file_content())?;

        debug!("{} -> {}", name, target);
        Ok(())
    }
}
