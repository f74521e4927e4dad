//! Page renderer
//!
//! Owns the loaded document, its selectable index, the scroll/navigation
//! state and the page's script context. All of it is touched only from
//! `tick` and `open`, which run on the render task; the input context talks
//! to the renderer through the input channel.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use mouseless_core::config::RendererConfig;
use mouseless_core::dispatch::Dispatcher;
use mouseless_core::document::{Document, NodeKind};
use mouseless_core::layout;
use mouseless_core::markup::MarkupParser;
use mouseless_core::navigation::{PendingAction, ReloadRequest};
use mouseless_core::traits::{Storage, StorageError};
use mouseless_display::{DisplayError, PixelDisplay, BACKGROUND_COLOR};
use mouseless_script::{ScriptError, ScriptHost};
use tracing::{debug, info, warn};

use crate::channels::InputChannel;
use crate::error::LoadError;

/// Page-root attribute evaluated when a page is entered
const ONLOAD: &str = "onload";
/// Page-root attributes evaluated when a page is left, first match wins
const ONUNLOAD: [&str; 2] = ["onunload", "onbeforeunload"];

/// The 3ML page renderer
pub struct Renderer<D, S> {
    display: D,
    storage: S,
    parser: Rc<dyn MarkupParser>,
    input: &'static InputChannel,
    config: RendererConfig,
    // Shared with the script context's native closures
    doc: Rc<RefCell<Document>>,
    loaded: bool,
    dispatcher: Dispatcher,
    script: Option<ScriptHost>,
    title: String,
}

impl<D: PixelDisplay, S: Storage> Renderer<D, S> {
    /// Create a renderer with no page loaded
    pub fn new(
        display: D,
        storage: S,
        parser: Rc<dyn MarkupParser>,
        input: &'static InputChannel,
        config: RendererConfig,
    ) -> Self {
        Self {
            display,
            storage,
            parser,
            input,
            dispatcher: Dispatcher::new(&config),
            title: config.default_title.as_str().to_string(),
            config,
            doc: Rc::new(RefCell::new(Document::new())),
            loaded: false,
            script: None,
        }
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    /// The loaded document
    pub fn document(&self) -> Ref<'_, Document> {
        self.doc.borrow()
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Status-bar label
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Load a page now, pushing it onto the history
    pub fn open(&mut self, path: &str) -> Result<(), LoadError> {
        self.load(&ReloadRequest {
            path: path.to_string(),
            back: false,
        })
    }

    /// Load a page on the next tick
    pub fn request(&mut self, path: &str) {
        self.dispatcher.navigation_mut().request_load(path);
    }

    /// One render tick
    ///
    /// Drains pending input, performs at most one deferred action (a reload,
    /// otherwise a script callback), then paints a frame.
    pub fn tick(&mut self) -> Result<(), DisplayError> {
        self.drain_input();
        self.run_pending_action();

        self.display.fill_screen(BACKGROUND_COLOR)?;
        if self.loaded {
            let doc = self.doc.borrow();
            let (scroll, entries) = self.dispatcher.layout_parts();
            layout::paint_body(&mut self.display, &doc, scroll, entries, &self.config)?;
        }
        layout::draw_status_bar(&mut self.display, &self.title, &self.config)?;
        self.display.flush()
    }

    /// Apply every queued input event, returning how many were received
    pub fn drain_input(&mut self) -> usize {
        let mut received = 0;
        while let Ok(event) = self.input.try_receive() {
            received += 1;
            let doc = self.doc.borrow();
            if let Some(command) = self.dispatcher.process_input(event, &doc) {
                debug!(?event, ?command, "input dispatched");
            }
        }
        received
    }

    fn run_pending_action(&mut self) {
        match self.dispatcher.navigation_mut().take_action() {
            Some(PendingAction::Reload(request)) => {
                if let Err(err) = self.load(&request) {
                    warn!(%err, "page load failed");
                }
            }
            Some(PendingAction::Callback(source)) => {
                if let Some(script) = &self.script {
                    debug!("running callback");
                    script.run("onclick", &source);
                }
                self.refresh_if_mutated();
            }
            None => {}
        }
    }

    /// Load a page, replacing the current one only if it reads and parses
    fn load(&mut self, request: &ReloadRequest) -> Result<(), LoadError> {
        let path = request.path.as_str();
        let bytes = self.storage.read(path).map_err(|error| LoadError::Storage {
            path: path.to_string(),
            error,
        })?;
        let specs = self
            .parser
            .parse_bytes(&bytes)
            .map_err(|error| LoadError::Markup {
                path: path.to_string(),
                error,
            })?;
        let next = Document::from_specs(specs);

        if self.loaded {
            let unload = self.root_attr(&ONUNLOAD);
            if let (Some(script), Some(source)) = (&self.script, unload) {
                script.run("onunload", &source);
            }
        }
        // The old context must not outlive the document it was bound to
        self.script = None;

        *self.doc.borrow_mut() = next;
        self.loaded = true;
        self.dispatcher.reset_for_load(&self.doc.borrow());
        self.dispatcher.navigation_mut().complete_load(request);
        self.title = self.config.default_title.as_str().to_string();

        match ScriptHost::new(self.doc.clone(), self.parser.clone()) {
            Ok(script) => self.script = Some(script),
            Err(err) => warn!(%err, "no script context for page"),
        }
        self.scan_head();
        if let (Some(script), Some(source)) = (&self.script, self.root_attr(&[ONLOAD])) {
            script.run(ONLOAD, &source);
        }
        self.refresh_if_mutated();

        info!(
            path,
            back = request.back,
            nodes = self.doc.borrow().len(),
            selectable = self.dispatcher.entries().len(),
            "page loaded"
        );
        Ok(())
    }

    /// Evaluate script references and capture the title
    ///
    /// Looks at the children of every top-level node. Scripts run in source
    /// order; a missing script file is skipped.
    fn scan_head(&mut self) {
        let mut sources = Vec::new();
        let mut title = None;
        {
            let doc = self.doc.borrow();
            for &top in doc.top_level() {
                for &child in doc.children(top) {
                    let Some(node) = doc.get(child) else {
                        continue;
                    };
                    match node.kind {
                        NodeKind::Script => {
                            if let Some(src) = node.attr("src") {
                                sources.push(src.to_string());
                            }
                        }
                        NodeKind::Title if title.is_none() => {
                            title = doc.text_lines(child).first().cloned();
                        }
                        _ => {}
                    }
                }
            }
        }

        if let Some(title) = title {
            self.title = title;
        }
        let Some(script) = &self.script else {
            return;
        };
        for src in sources {
            match script.load_script(&self.storage, &src) {
                Ok(()) => {}
                Err(ScriptError::Storage {
                    error: StorageError::NotFound,
                    ..
                }) => debug!(src = %src, "script file missing, skipped"),
                Err(err) => warn!(src = %src, %err, "script failed"),
            }
        }
    }

    fn root_attr(&self, names: &[&str]) -> Option<String> {
        let doc = self.doc.borrow();
        let root = doc.get(doc.page_root()?)?;
        names
            .iter()
            .find_map(|name| root.attr(name))
            .map(str::to_string)
    }

    /// Rebuild the selectable index after script changed the document
    fn refresh_if_mutated(&mut self) {
        if self.script.as_ref().is_some_and(ScriptHost::take_mutation) {
            self.dispatcher.refresh(&self.doc.borrow());
            debug!(
                selectable = self.dispatcher.entries().len(),
                "document changed by script"
            );
        }
    }
}
