use std::collections::BTreeMap;
use std::env;
use std::path::PathBuf;
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use toml_edit::{Document, Item, Table};

/// The facade crate re-exporting every `vc_*` crate of the workspace.
const FACADE: &str = "vc_jsonb";
const PREFIX: &str = "vc_";

/// The Cargo.toml of the crate invoking a proc-macro.
///
/// Generated code has to name the runtime crate the way the invoking crate
/// sees it. A crate depending on `vc_bind` names it `::vc_bind`; a crate that
/// only depends on the facade names it `::vc_jsonb::bind`.
///
/// # Example
///
/// ```rust
/// # use vc_macro_utils::Manifest;
/// let path: syn::Path = Manifest::shared(|m| m.get_crate_path("vc_bind"));
/// ```
///
/// # Resolution
///
/// 1. `dependencies` lists the crate: `::name`.
/// 2. `dependencies` lists the facade and the name starts with `vc_`:
///    `::vc_jsonb::short_name`.
/// 3. The same two checks on `dev-dependencies`.
/// 4. Otherwise `::name`. Inside the crate itself this relies on an
///    `extern crate self as name;` alias at the crate root.
#[derive(Debug)]
pub struct Manifest {
    pub manifest: Document<Box<str>>,
    pub modified_time: SystemTime,
}

impl Manifest {
    fn path() -> PathBuf {
        let dir = env::var_os("CARGO_MANIFEST_DIR")
            .unwrap_or_else(|| panic!("CARGO_MANIFEST_DIR is set by cargo"));
        let mut path = PathBuf::from(dir);
        path.push("Cargo.toml");
        path
    }

    fn load(path: &PathBuf, modified_time: SystemTime) -> Self {
        let text = std::fs::read_to_string(path)
            .unwrap_or_else(|err| panic!("cannot read {}: {err}", path.display()));
        let manifest = Document::parse(text.into_boxed_str())
            .unwrap_or_else(|err| panic!("cannot parse {}: {err}", path.display()));
        Self {
            manifest,
            modified_time,
        }
    }

    fn lookup(deps: &Table, name: &str) -> Option<syn::Path> {
        if deps.contains_key(name) {
            return Some(parse(&format!("::{name}")));
        }
        let short = name.strip_prefix(PREFIX)?;
        deps.contains_key(FACADE)
            .then(|| parse(&format!("::{FACADE}::{short}")))
    }

    /// The path of the crate `name` as seen from the invoking crate.
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        ["dependencies", "dev-dependencies"]
            .into_iter()
            .find_map(|section| match self.manifest.get(section) {
                Some(Item::Table(deps)) => Self::lookup(deps, name),
                _ => None,
            })
            .unwrap_or_else(|| parse(&format!("::{name}")))
    }

    /// Runs `func` on the cached manifest of the invoking crate.
    ///
    /// The manifest is re-read when the file changed since it was cached.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static CACHE: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let path = Self::path();
        let modified_time = std::fs::metadata(&path)
            .and_then(|meta| meta.modified())
            .unwrap_or(SystemTime::UNIX_EPOCH);

        {
            let cache = CACHE.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(manifest) = cache.get(&path)
                && manifest.modified_time == modified_time
            {
                return func(manifest);
            }
        }

        let manifest = Self::load(&path, modified_time);
        let result = func(&manifest);
        CACHE
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path, manifest);
        result
    }
}

fn parse(path: &str) -> syn::Path {
    syn::parse_str(path).unwrap_or_else(|err| panic!("`{path}` is not a path: {err}"))
}
