use std::path::Path;
use std::sync::Arc;

use usvg::fontdb;

/// Raw font file bytes plus the face index inside the file.
#[derive(Clone)]
pub struct FontFace {
    /// Font file contents (TTF/OTF/TTC).
    pub bytes: Arc<Vec<u8>>,
    /// Face index for collections; `0` for single-face files.
    pub index: u32,
    /// Where the face came from (path or family name), for diagnostics.
    pub origin: String,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("origin", &self.origin)
            .field("index", &self.index)
            .field("bytes_len", &self.bytes.len())
            .finish()
    }
}

/// Outcome of resolving a user-supplied font identifier.
#[derive(Clone, Debug)]
pub enum FontResolution {
    /// The identifier named a readable font file or an installed family.
    Loaded(FontFace),
    /// Nothing matched; callers render with the default face instead.
    Fallback,
}

impl FontResolution {
    /// `true` when the requested font could not be resolved.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback)
    }
}

/// Resolves font identifiers (file paths or family names) against the system font database.
///
/// System fonts are only scanned the first time a family-name lookup needs them.
#[derive(Default)]
pub struct FontResolver {
    db: Option<fontdb::Database>,
}

impl FontResolver {
    /// Resolver backed by the system font database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver backed by a caller-provided database (no system scan).
    pub fn with_database(db: fontdb::Database) -> Self {
        Self { db: Some(db) }
    }

    /// Resolve `identifier` as a font file path first, then as a family name.
    pub fn resolve(&mut self, identifier: &str) -> FontResolution {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return FontResolution::Fallback;
        }

        let path = Path::new(identifier);
        if path.is_file() {
            return match std::fs::read(path) {
                Ok(bytes) => FontResolution::Loaded(FontFace {
                    bytes: Arc::new(bytes),
                    index: 0,
                    origin: identifier.to_owned(),
                }),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "failed to read font file");
                    FontResolution::Fallback
                }
            };
        }

        let families = [fontdb::Family::Name(identifier)];
        let query = fontdb::Query {
            families: &families,
            ..fontdb::Query::default()
        };
        let db = self.database();
        match db.query(&query).and_then(|id| face_from_db(db, id, identifier)) {
            Some(face) => FontResolution::Loaded(face),
            None => FontResolution::Fallback,
        }
    }

    /// Default face used for [`FontResolution::Fallback`]: the database's sans-serif family,
    /// else whatever face is installed first. `None` on machines with no fonts at all.
    pub fn default_face(&mut self) -> Option<FontFace> {
        let db = self.database();
        let families = [fontdb::Family::SansSerif];
        let query = fontdb::Query {
            families: &families,
            ..fontdb::Query::default()
        };
        let id = db
            .query(&query)
            .or_else(|| db.faces().next().map(|face| face.id))?;
        face_from_db(db, id, "default")
    }

    fn database(&mut self) -> &fontdb::Database {
        self.db.get_or_insert_with(|| {
            let mut db = fontdb::Database::new();
            db.load_system_fonts();
            tracing::debug!(faces = db.len(), "loaded system font database");
            db
        })
    }
}

fn face_from_db(db: &fontdb::Database, id: fontdb::ID, origin: &str) -> Option<FontFace> {
    db.with_face_data(id, |data, index| FontFace {
        bytes: Arc::new(data.to_vec()),
        index,
        origin: origin.to_owned(),
    })
}
