//! Shared helpers for integration tests
#![allow(dead_code)]

use futures::executor::LocalPool;
use neighborhood_map::prelude::*;
pub use neighborhood_map::testing::ControlledSource;

pub struct Session {
    pub pool: LocalPool,
    pub runtime: Rc<ManualRuntime>,
    pub source: Rc<ControlledSource>,
    pub vm: ViewModel<HeadlessSurface>,
}

impl Session {
    pub fn new() -> Self {
        Self::with_config(&AppConfig::default())
    }

    pub fn with_config(config: &AppConfig) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let pool = LocalPool::new();
        let runtime = Rc::new(ManualRuntime::new(&pool));
        let source = Rc::new(ControlledSource::default());
        let vm = ViewModel::new(
            config,
            Rc::new(RefCell::new(HeadlessSurface::new())),
            source.clone(),
            runtime.clone(),
        )
        .expect("default config is valid");

        Self {
            pool,
            runtime,
            source,
            vm,
        }
    }

    /// Runs every task that can make progress
    pub fn settle(&mut self) {
        self.pool.run_until_stalled();
    }

    pub fn place(&self, index: usize) -> Rc<Place> {
        self.vm.neighborhood().place(index).unwrap().clone()
    }

    pub fn attached(&self) -> Vec<usize> {
        self.vm.surface().borrow().attached_markers()
    }

    pub fn open_popups(&self) -> Vec<usize> {
        self.vm.surface().borrow().open_popups()
    }

    pub fn popup_html(&self, index: usize) -> String {
        self.vm
            .surface()
            .borrow()
            .popup_content(index)
            .unwrap()
            .to_string()
    }
}
