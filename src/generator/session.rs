//! Generation sessions: the generator registry and its completion deadline

use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Instant;

use tracing::{debug, warn};

use super::axis::Axis;
use super::config::GeneratorConfig;
use super::error::GenerateError;
use super::value::Value;
use super::variant::Variant;
use super::variant_generator::{Replacement, VariantGenerator};

type Registry = Mutex<Vec<Generator>>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Factory handed to a creator; every generator it makes is collected
#[derive(Clone)]
pub struct Results {
    registry: Arc<Registry>,
    config: GeneratorConfig,
}

impl Results {
    fn new(config: GeneratorConfig) -> Self {
        Self {
            registry: Arc::new(Mutex::new(Vec::new())),
            config,
        }
    }

    /// Register a new active generator using the session config
    pub fn create(&self) -> Generator {
        self.create_with(self.config.clone())
    }

    /// Register a new active generator with its own config
    pub fn create_with(&self, config: GeneratorConfig) -> Generator {
        let generator = Generator {
            state: Arc::new(Mutex::new(VariantGenerator::new(config))),
            registry: Arc::downgrade(&self.registry),
        };
        lock(&self.registry).push(generator.clone());
        generator
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Number of registered generators, branches included
    pub fn len(&self) -> usize {
        lock(&self.registry).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy the state of every registered generator in creation order
    fn snapshot(&self) -> Vec<VariantGenerator> {
        let handles = lock(&self.registry).clone();
        handles.iter().map(Generator::snapshot).collect()
    }

    fn conclude(&self) -> Result<Vec<Variant>, GenerateError> {
        let mut variants = Vec::new();
        for generator in self.snapshot() {
            variants.extend(generator.generate()?);
        }
        Ok(variants)
    }
}

/// Shared handle to a registered [`VariantGenerator`]
///
/// Cloning the handle shares the underlying state; use
/// [`Generator::snapshot`] for an independent copy. Setters return `&Self`
/// so calls chain the same way as on a plain generator.
#[derive(Clone)]
pub struct Generator {
    state: Arc<Mutex<VariantGenerator>>,
    registry: Weak<Registry>,
}

impl std::fmt::Debug for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Generator").field(&*lock(&self.state)).finish()
    }
}

impl Generator {
    fn edit(&self, f: impl FnOnce(&mut VariantGenerator)) -> &Self {
        f(&mut *lock(&self.state));
        self
    }

    /// Independent copy of the current state
    pub fn snapshot(&self) -> VariantGenerator {
        lock(&self.state).clone()
    }

    /// Expand this generator alone
    pub fn generate(&self) -> Result<Vec<Variant>, GenerateError> {
        Ok(self.snapshot().generate()?)
    }

    pub fn is_active(&self) -> bool {
        lock(&self.state).is_active()
    }

    pub fn activate(&self) -> &Self {
        self.edit(|g| {
            g.activate();
        })
    }

    pub fn deactivate(&self) -> &Self {
        self.edit(|g| {
            g.deactivate();
        })
    }

    /// Deactivate this generator and register an active copy of it
    ///
    /// After the session has concluded the copy is still returned but no
    /// longer collected.
    pub fn branch(&self) -> Generator {
        let mut copy = self.snapshot();
        self.deactivate();
        copy.activate();

        let branch = Generator {
            state: Arc::new(Mutex::new(copy)),
            registry: self.registry.clone(),
        };
        if let Some(registry) = self.registry.upgrade() {
            lock(&registry).push(branch.clone());
        }
        branch
    }

    /// Register one branch per function, configured by that function
    ///
    /// Returns this (now deactivated) generator.
    pub fn branch_with<I, F>(&self, configure: I) -> &Self
    where
        I: IntoIterator<Item = F>,
        F: FnOnce(&Generator),
    {
        for f in configure {
            let branch = self.branch();
            f(&branch);
        }
        self
    }

    /// One branch per `[density, width, height]` row
    pub fn matrix(&self, rows: impl IntoIterator<Item = [f64; 3]>) -> &Self {
        self.branch_with(rows.into_iter().map(|[density, width, height]| {
            move |branch: &Generator| {
                branch.density(density).size(width, height);
            }
        }))
    }

    pub fn density(&self, density: f64) -> &Self {
        self.edit(|g| {
            g.density(density);
        })
    }

    pub fn densities(&self, densities: impl IntoIterator<Item = f64>) -> &Self {
        self.edit(|g| {
            g.densities(densities);
        })
    }

    pub fn size(&self, width: f64, height: f64) -> &Self {
        self.edit(|g| {
            g.size(width, height);
        })
    }

    pub fn sizes(&self, sizes: impl IntoIterator<Item = (f64, f64)>) -> &Self {
        self.edit(|g| {
            g.sizes(sizes);
        })
    }

    pub fn cap(&self, width: f64, height: f64) -> &Self {
        self.edit(|g| {
            g.cap(width, height);
        })
    }

    pub fn caps(&self, caps: impl IntoIterator<Item = (f64, f64)>) -> &Self {
        self.edit(|g| {
            g.caps(caps);
        })
    }

    pub fn format(&self, format: impl Into<String>) -> &Self {
        self.edit(|g| {
            g.format(format);
        })
    }

    pub fn formats<S: Into<String>>(&self, formats: impl IntoIterator<Item = S>) -> &Self {
        self.edit(|g| {
            g.formats(formats);
        })
    }

    pub fn filename(&self, filename: impl Into<String>) -> &Self {
        self.edit(|g| {
            g.filename(filename);
        })
    }

    pub fn filenames<S: Into<String>>(&self, filenames: impl IntoIterator<Item = S>) -> &Self {
        self.edit(|g| {
            g.filenames(filenames);
        })
    }

    pub fn directory(&self, directory: impl Into<String>) -> &Self {
        self.edit(|g| {
            g.directory(directory);
        })
    }

    pub fn directories<S: Into<String>>(&self, directories: impl IntoIterator<Item = S>) -> &Self {
        self.edit(|g| {
            g.directories(directories);
        })
    }

    pub fn rotate(&self, rotate: bool) -> &Self {
        self.edit(|g| {
            g.rotate(rotate);
        })
    }

    pub fn data(&self, key: impl Into<String>, value: impl Into<Value>) -> &Self {
        self.edit(|g| {
            g.data(key, value);
        })
    }

    pub fn data_fn<F, R>(&self, key: impl Into<String>, f: F) -> &Self
    where
        F: Fn(&Variant, &VariantGenerator) -> R + Send + Sync + 'static,
        R: Into<Value>,
    {
        self.edit(|g| {
            g.data_fn(key, f);
        })
    }

    pub fn procedure<F, R>(&self, name: impl Into<String>, f: F) -> &Self
    where
        F: Fn(&Variant, &VariantGenerator) -> R + Send + Sync + 'static,
        R: Into<Value>,
    {
        self.edit(|g| {
            g.procedure(name, f);
        })
    }

    pub fn compute<F, R>(&self, axis: Axis, f: F) -> &Self
    where
        F: Fn(&Variant, &VariantGenerator) -> R + Send + Sync + 'static,
        R: Into<Value>,
    {
        self.edit(|g| {
            g.compute(axis, f);
        })
    }

    pub fn replace(
        &self,
        property: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<Replacement>,
    ) -> &Self {
        self.edit(|g| {
            g.replace(property, from, to);
        })
    }
}

/// Completion signal for [`Creator::Deadline`]
///
/// May be cloned and moved to other threads. Signalling after the session
/// has concluded does nothing.
#[derive(Debug, Clone)]
pub struct Done {
    tx: mpsc::Sender<()>,
}

impl Done {
    pub fn finish(&self) {
        // receiver gone means the session already concluded
        let _ = self.tx.send(());
    }
}

/// The user callback that declares generators
pub enum Creator<'a> {
    /// Concludes as soon as the callback returns
    Sync(Box<dyn FnOnce(&Results) + 'a>),
    /// Concludes when [`Done::finish`] is called, or fails at the deadline
    Deadline(Box<dyn FnOnce(&Results, Done) + 'a>),
}

impl<'a> Creator<'a> {
    pub fn sync(f: impl FnOnce(&Results) + 'a) -> Self {
        Creator::Sync(Box::new(f))
    }

    pub fn deadline(f: impl FnOnce(&Results, Done) + 'a) -> Self {
        Creator::Deadline(Box::new(f))
    }
}

/// A single run of a creator
pub struct Session<'a> {
    config: GeneratorConfig,
    creator: Creator<'a>,
}

impl<'a> Session<'a> {
    pub fn new(config: GeneratorConfig, creator: Creator<'a>) -> Self {
        Self { config, creator }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Run the creator and collect the variants of every active generator
    ///
    /// Output is in generator creation order, then cross-product order.
    #[tracing::instrument(level = "debug", skip(self), fields(timeout = ?self.config.timeout))]
    pub fn run(self) -> Result<Vec<Variant>, GenerateError> {
        let results = Results::new(self.config.clone());

        match self.creator {
            Creator::Sync(f) => f(&results),
            Creator::Deadline(f) => {
                let timeout = self.config.timeout;
                let started = Instant::now();
                let (tx, rx) = mpsc::channel();
                f(&results, Done { tx });

                match rx.recv_timeout(timeout.saturating_sub(started.elapsed())) {
                    Ok(()) => {}
                    Err(RecvTimeoutError::Timeout) => {
                        warn!(?timeout, "variant generation timed out");
                        return Err(GenerateError::Timeout { timeout });
                    }
                    Err(RecvTimeoutError::Disconnected) => {
                        std::thread::sleep(timeout.saturating_sub(started.elapsed()));
                        warn!(?timeout, "completion handle dropped without finishing");
                        return Err(GenerateError::Timeout { timeout });
                    }
                }
            }
        }

        let variants = results.conclude()?;
        debug!(
            generators = results.len(),
            variants = variants.len(),
            "session concluded"
        );
        Ok(variants)
    }
}

/// Run `creator` with the default configuration
pub fn define<'a>(creator: Creator<'a>) -> Session<'a> {
    Session::new(GeneratorConfig::default(), creator)
}
