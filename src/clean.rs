use std::path::Path;

/// Removes the folder and its contents.
/// Failures are only logged; returns whether the folder was removed.
pub fn remove_folder(folder: &Path) -> bool {
    match std::fs::remove_dir_all(folder) {
        Ok(_) => {
            log::info!(
                "folder {} and its contents removed successfully",
                folder.display()
            );
            true
        }
        Err(e) => {
            log::error!(
                "an error occurred while removing folder {}: {}",
                folder.display(),
                e
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_folder_with_contents() {
        let tmp = tempfile::tempdir().unwrap();
        let data = tmp.path().join("data");
        std::fs::create_dir_all(data.join("nested")).unwrap();
        std::fs::write(data.join("doses_A.csv"), "Mes,Dia,Dosis\n").unwrap();
        assert!(remove_folder(&data));
        assert!(!data.exists());
    }

    #[test]
    fn missing_folder_is_not_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(!remove_folder(&tmp.path().join("never_created")));
    }
}
