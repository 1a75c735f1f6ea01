// 📁 Image Archive - Local point photo collections
//
// Two optional on-disk collections supplement the synthesized source links:
//   - a scraped archive, one directory per point code
//   - a Chinese reference dump, flat files named by Chinese point name
//
// Neither is required. Missing directories produce empty listings, and all
// listings are sorted so indexes come out identical run to run.
//
// Chinese file names sometimes carry a 穴 suffix and sometimes do not
// ("合谷穴1.jpg" vs "足三里1.jpg"), so matching strips the suffix from the
// mapped name and prefix-matches the rest.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

// ============================================================================
// CODE → CHINESE NAME
// ============================================================================

// Codes the archives may carry images for. Wider than the catalog on
// purpose: the photo collections cover points the reference table does not.
static CODE_TO_CHINESE: &[(&str, &str)] = &[
    ("GB30", "环跳穴"),
    ("BL23", "肾俞穴"),
    ("BL40", "委中穴"),
    ("BL60", "昆仑穴"),
    ("KI3", "太溪穴"),
    ("LI4", "合谷穴"),
    ("LR3", "太冲穴"),
    ("LV3", "太冲穴"),
    ("PC6", "内关穴"),
    ("ST36", "足三里"),
    ("SP6", "三阴交"),
    ("SP4", "公孙穴"),
    ("HT7", "神门穴"),
    ("KI1", "涌泉穴"),
    ("GB20", "风池穴"),
    ("GB21", "肩井穴"),
    ("SI3", "后溪穴"),
    ("SJ5", "外关穴"),
    ("BL2", "攒竹穴"),
    ("EX-HN3", "印堂穴"),
    ("EX-HN5", "太阳穴"),
    ("AURICULAR_SHENMEN", "耳神门"),
    ("TF4", "耳神门穴"),
    ("GV20", "百会穴"),
    ("CV17", "膻中穴"),
    ("LI11", "曲池穴"),
    ("LR14", "期门穴"),
    ("BL32", "次髎穴"),
    ("GB34", "阳陵泉"),
    ("GV4", "命门穴"),
];

/// Chinese archive name for a (canonical, upper-case) code.
pub fn chinese_name_for(code: &str) -> Option<&'static str> {
    CODE_TO_CHINESE
        .iter()
        .find(|(key, _)| *key == code)
        .map(|(_, name)| *name)
}

/// All codes the archive mapping knows, in table order.
pub fn mapped_codes() -> Vec<&'static str> {
    CODE_TO_CHINESE.iter().map(|(code, _)| *code).collect()
}

pub fn is_image_file(name: &str) -> bool {
    let lower = name.to_lowercase();
    [".jpg", ".png", ".gif", ".webp"]
        .iter()
        .any(|ext| lower.ends_with(ext))
}

// ============================================================================
// ARCHIVE
// ============================================================================

/// One archive file: where it lives on disk and the web path it is served
/// or exported under.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveFile {
    pub path: PathBuf,
    pub web_path: String,
}

/// Image index for one point, as served by the API and written by the
/// exporter.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ImageIndex {
    pub code: String,
    pub images: Vec<String>,
    pub count: usize,
}

/// Read-only view over both photo collections.
#[derive(Debug, Clone)]
pub struct ImageArchive {
    image_dir: PathBuf,
    chinese_image_dir: PathBuf,
}

impl ImageArchive {
    pub fn new(image_dir: impl Into<PathBuf>, chinese_image_dir: impl Into<PathBuf>) -> Self {
        ImageArchive {
            image_dir: image_dir.into(),
            chinese_image_dir: chinese_image_dir.into(),
        }
    }

    /// Web-path index of every image for a code, scraped first then
    /// Chinese, each group sorted by file name.
    pub fn list(&self, code: &str) -> ImageIndex {
        let code_upper = code.to_uppercase();
        let mut images: Vec<String> = self
            .scraped_files(&code_upper)
            .into_iter()
            .map(|f| f.web_path)
            .collect();
        images.extend(
            self.chinese_files_for(&code_upper)
                .into_iter()
                .map(|f| f.web_path),
        );
        ImageIndex {
            code: code_upper,
            count: images.len(),
            images,
        }
    }

    /// Files under `<image_dir>/<CODE>/`.
    pub fn scraped_files(&self, code_upper: &str) -> Vec<ArchiveFile> {
        let dir = self.image_dir.join(code_upper);
        sorted_image_files(&dir)
            .into_iter()
            .map(|name| ArchiveFile {
                path: dir.join(&name),
                web_path: format!("/images/{}/{}", code_upper, name),
            })
            .collect()
    }

    /// Chinese files whose name starts with the mapped point name.
    pub fn chinese_files_for(&self, code_upper: &str) -> Vec<ArchiveFile> {
        let Some(chinese_name) = chinese_name_for(code_upper) else {
            return Vec::new();
        };
        let prefix = chinese_name.trim_end_matches('穴');
        sorted_image_files(&self.chinese_image_dir)
            .into_iter()
            .filter(|name| name.starts_with(prefix))
            .map(|name| ArchiveFile {
                path: self.chinese_image_dir.join(&name),
                web_path: format!("/images/chinese/{}", name),
            })
            .collect()
    }

    /// Every file in the Chinese collection.
    pub fn chinese_files(&self) -> Vec<ArchiveFile> {
        sorted_image_files(&self.chinese_image_dir)
            .into_iter()
            .map(|name| ArchiveFile {
                path: self.chinese_image_dir.join(&name),
                web_path: format!("/images/chinese/{}", name),
            })
            .collect()
    }

    /// Codes that have a scraped directory, sorted.
    pub fn scraped_codes(&self) -> Vec<String> {
        let mut codes: Vec<String> = match fs::read_dir(&self.image_dir) {
            Ok(entries) => entries
                .filter_map(|e| e.ok())
                .filter(|e| e.path().is_dir())
                .filter_map(|e| e.file_name().into_string().ok())
                .collect(),
            Err(_) => Vec::new(),
        };
        codes.sort();
        codes
    }

    /// Absolute path of one scraped image, if it exists and the name is a
    /// plain file name.
    pub fn resolve_scraped(&self, code: &str, filename: &str) -> Option<PathBuf> {
        if !is_plain_file_name(filename) {
            return None;
        }
        let path = self.image_dir.join(code.to_uppercase()).join(filename);
        path.is_file().then_some(path)
    }

    /// Absolute path of one Chinese archive image.
    pub fn resolve_chinese(&self, filename: &str) -> Option<PathBuf> {
        if !is_plain_file_name(filename) {
            return None;
        }
        let path = self.chinese_image_dir.join(filename);
        path.is_file().then_some(path)
    }
}

/// Image file names in a directory, sorted. A missing or unreadable
/// directory is just empty.
fn sorted_image_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = match fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file())
            .filter_map(|e| e.file_name().into_string().ok())
            .filter(|name| is_image_file(name))
            .collect(),
        Err(_) => Vec::new(),
    };
    names.sort();
    names
}

// Keeps served paths inside the archive directories
fn is_plain_file_name(filename: &str) -> bool {
    !filename.is_empty()
        && !filename.contains('/')
        && !filename.contains('\\')
        && filename != "."
        && filename != ".."
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn archive_with_fixtures() -> (tempfile::TempDir, ImageArchive) {
        let dir = tempfile::tempdir().unwrap();
        let scraped = dir.path().join("scraped");
        let chinese = dir.path().join("chinese");

        fs::create_dir_all(scraped.join("LI4")).unwrap();
        fs::write(scraped.join("LI4/b.jpg"), b"img").unwrap();
        fs::write(scraped.join("LI4/a.png"), b"img").unwrap();
        fs::write(scraped.join("LI4/notes.txt"), b"skip").unwrap();

        fs::create_dir_all(&chinese).unwrap();
        fs::write(chinese.join("合谷穴1.jpg"), b"img").unwrap();
        fs::write(chinese.join("合谷2.webp"), b"img").unwrap();
        fs::write(chinese.join("足三里1.jpg"), b"img").unwrap();
        fs::write(chinese.join("readme.md"), b"skip").unwrap();

        let archive = ImageArchive::new(&scraped, &chinese);
        (dir, archive)
    }

    #[test]
    fn test_list_combines_both_collections_sorted() {
        let (_dir, archive) = archive_with_fixtures();
        let index = archive.list("li4");

        assert_eq!(index.code, "LI4");
        assert_eq!(index.count, 4);
        assert_eq!(
            index.images,
            vec![
                "/images/LI4/a.png",
                "/images/LI4/b.jpg",
                "/images/chinese/合谷2.webp",
                "/images/chinese/合谷穴1.jpg",
            ]
        );
    }

    #[test]
    fn test_suffix_free_chinese_names_match() {
        let (_dir, archive) = archive_with_fixtures();
        let index = archive.list("ST36");
        assert_eq!(index.images, vec!["/images/chinese/足三里1.jpg"]);
    }

    #[test]
    fn test_missing_directories_yield_empty_index() {
        let archive = ImageArchive::new("/no/such/dir", "/no/such/other");
        let index = archive.list("LI4");
        assert_eq!(index.count, 0);
        assert!(index.images.is_empty());
        assert!(archive.scraped_codes().is_empty());
    }

    #[test]
    fn test_unmapped_code_gets_no_chinese_images() {
        let (_dir, archive) = archive_with_fixtures();
        assert!(archive.chinese_files_for("XX99").is_empty());
    }

    #[test]
    fn test_resolve_guards_path_traversal() {
        let (_dir, archive) = archive_with_fixtures();
        assert!(archive.resolve_scraped("LI4", "a.png").is_some());
        assert!(archive.resolve_scraped("LI4", "../secrets.png").is_none());
        assert!(archive.resolve_scraped("LI4", "..").is_none());
        assert!(archive.resolve_chinese("合谷穴1.jpg").is_some());
        assert!(archive.resolve_chinese("sub/file.jpg").is_none());
    }

    #[test]
    fn test_scraped_codes_sorted() {
        let (_dir, archive) = archive_with_fixtures();
        assert_eq!(archive.scraped_codes(), vec!["LI4"]);
    }

    #[test]
    fn test_code_mapping() {
        assert_eq!(chinese_name_for("LI4"), Some("合谷穴"));
        assert_eq!(chinese_name_for("ST36"), Some("足三里"));
        assert_eq!(chinese_name_for("XX99"), None);
        assert!(mapped_codes().contains(&"AURICULAR_SHENMEN"));
    }

    #[test]
    fn test_image_file_detection() {
        assert!(is_image_file("photo.JPG"));
        assert!(is_image_file("chart.webp"));
        assert!(!is_image_file("notes.txt"));
        assert!(!is_image_file("archive.jpg.zip"));
    }
}
