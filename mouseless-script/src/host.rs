//! Per-page interpreter context

use std::cell::RefCell;
use std::rc::Rc;

use mouseless_core::document::Document;
use mouseless_core::markup::MarkupParser;
use mouseless_core::traits::Storage;
use rquickjs::{Context, Ctx, Runtime, Value};
use tracing::{debug, warn};

use crate::bindings::{self, Bridge};
use crate::console;
use crate::error::ScriptError;

/// An interpreter context bound to one loaded document
///
/// Dropping the host destroys the context; create a new host for every
/// navigation.
pub struct ScriptHost {
    // Declared before the runtime so it is dropped first
    context: Context,
    _runtime: Runtime,
    bridge: Bridge,
}

impl ScriptHost {
    /// Create a context with `document` and `console` installed
    pub fn new(
        doc: Rc<RefCell<Document>>,
        parser: Rc<dyn MarkupParser>,
    ) -> Result<Self, ScriptError> {
        let runtime = Runtime::new()?;
        let context = Context::full(&runtime)?;
        let bridge = Bridge::new(doc, parser);

        context.with(|ctx| -> rquickjs::Result<()> {
            console::install_console(&ctx)?;
            bindings::install_document(&ctx, bridge.clone())
        })?;

        Ok(Self {
            context,
            _runtime: runtime,
            bridge,
        })
    }

    /// Evaluate a script
    pub fn eval(&self, source: impl Into<Vec<u8>>) -> Result<(), ScriptError> {
        self.context.with(|ctx| match ctx.eval::<Value<'_>, _>(source) {
            Ok(_) => Ok(()),
            Err(rquickjs::Error::Exception) => Err(ScriptError::Exception(exception_message(&ctx))),
            Err(err) => Err(err.into()),
        })
    }

    /// Evaluate a script, logging instead of returning a failure
    ///
    /// Returns whether evaluation succeeded.
    pub fn run(&self, label: &str, source: &str) -> bool {
        match self.eval(source) {
            Ok(()) => true,
            Err(err) => {
                warn!(label, %err, "script failed");
                false
            }
        }
    }

    /// Read and evaluate a script file as one unit
    pub fn load_script<S: Storage + ?Sized>(
        &self,
        storage: &S,
        path: &str,
    ) -> Result<(), ScriptError> {
        let source = storage.read(path).map_err(|error| ScriptError::Storage {
            path: path.to_string(),
            error,
        })?;
        debug!(path, bytes = source.len(), "evaluating script file");
        self.eval(source)
    }

    /// Whether script changed the document since the last call
    pub fn take_mutation(&self) -> bool {
        self.bridge.take_mutation()
    }
}

fn exception_message(ctx: &Ctx<'_>) -> String {
    let caught = ctx.catch();
    if let Some(message) = caught.as_exception().and_then(|exception| exception.message()) {
        return message;
    }
    caught
        .as_string()
        .and_then(|s| s.to_string().ok())
        .unwrap_or_else(|| String::from("non-error value thrown"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mouseless_core::document::NodeId;
    use mouseless_core::testing::{MemoryStorage, TagParser};
    use mouseless_core::traits::StorageError;
    use rquickjs::FromJs;

    const PAGE: &str = r#"<body onload="init()">
        <div id="list" class="menu"><a href="/a.3ml">A</a></div>
        <button id="go" onclick="go()">Go</button>
    </body>"#;

    fn setup(markup: &str) -> (Rc<RefCell<Document>>, ScriptHost) {
        let parser = TagParser::new();
        let doc = Document::from_specs(parser.parse_clean(markup).unwrap());
        let doc = Rc::new(RefCell::new(doc));
        let host = ScriptHost::new(doc.clone(), Rc::new(parser)).unwrap();
        (doc, host)
    }

    fn eval_as<T: for<'js> FromJs<'js>>(host: &ScriptHost, source: &str) -> T {
        host.context
            .with(|ctx| ctx.eval::<T, _>(source))
            .unwrap()
    }

    fn child_lines(doc: &Document, parent: NodeId) -> Vec<Vec<String>> {
        doc.children(parent)
            .iter()
            .map(|id| doc.text_lines(*id).to_vec())
            .collect()
    }

    #[test]
    fn test_get_element_by_id_attributes() {
        let (_doc, host) = setup(PAGE);
        let class: String = eval_as(&host, "document.getElementById('list').class");
        assert_eq!(class, "menu");
        let onclick: String = eval_as(&host, "document.getElementById('go').onclick");
        assert_eq!(onclick, "go()");
    }

    #[test]
    fn test_get_element_by_id_missing_is_undefined() {
        let (_doc, host) = setup(PAGE);
        assert!(eval_as::<bool>(
            &host,
            "document.getElementById('nope') === undefined"
        ));
        assert!(eval_as::<bool>(&host, "document.getElementById() === undefined"));
    }

    #[test]
    fn test_inner_html_matches_standalone_parse() {
        let (doc, host) = setup(PAGE);
        let markup = "<a href=\"/b.3ml\">Second page</a>plain words that need wrapping on the panel";
        host.eval(format!(
            "document.getElementById('list').innerHTML = '{markup}'"
        ))
        .unwrap();
        assert!(host.take_mutation());
        assert!(!host.take_mutation());

        let standalone = Document::from_specs(TagParser::new().parse_clean(markup).unwrap());
        let expected: Vec<Vec<String>> = standalone
            .top_level()
            .iter()
            .map(|id| standalone.text_lines(*id).to_vec())
            .collect();

        let doc = doc.borrow();
        let list = doc.find_by_id("list").unwrap();
        assert_eq!(child_lines(&doc, list), expected);
        assert!(doc.get(doc.children(list)[0]).unwrap().selectable);
    }

    #[test]
    fn test_inner_html_on_removed_element_is_inert() {
        let (doc, host) = setup(PAGE);
        host.eval(
            "var kept = document.getElementById('list');\
             document.getElementById('list').innerHTML = 'x';",
        )
        .unwrap();
        assert!(host.take_mutation());

        // Replace the whole body, removing the kept element's node
        let root = doc.borrow().page_root().unwrap();
        doc.borrow_mut().replace_children(root, vec![]);
        host.eval("kept.innerHTML = 'y'").unwrap();
        assert!(!host.take_mutation());
        assert!(doc.borrow().children(root).is_empty());
    }

    #[test]
    fn test_inner_html_rejects_bad_markup() {
        let (doc, host) = setup(PAGE);
        host.eval("document.getElementById('list').innerHTML = '<div>'")
            .unwrap();
        assert!(!host.take_mutation());
        let doc = doc.borrow();
        let list = doc.find_by_id("list").unwrap();
        assert_eq!(doc.children(list).len(), 1);
    }

    #[test]
    fn test_exception_message() {
        let (_doc, host) = setup(PAGE);
        match host.eval("throw new Error('boom')") {
            Err(ScriptError::Exception(message)) => assert_eq!(message, "boom"),
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(matches!(
            host.eval("this is not javascript"),
            Err(ScriptError::Exception(_))
        ));
        assert!(!host.run("onclick", "undefinedFunction()"));
    }

    #[test]
    fn test_state_survives_between_evaluations() {
        let (_doc, host) = setup(PAGE);
        host.eval("var count = 1;").unwrap();
        assert!(host.run("onclick", "count += 1; console.log('count', count)"));
        assert_eq!(eval_as::<i32>(&host, "count"), 2);
    }

    #[test]
    fn test_contexts_are_isolated() {
        let (doc, host) = setup(PAGE);
        host.eval("var leaked = true;").unwrap();
        let fresh = ScriptHost::new(doc, Rc::new(TagParser::new())).unwrap();
        assert!(eval_as::<bool>(&fresh, "typeof leaked === 'undefined'"));
    }

    #[test]
    fn test_load_script() {
        let (_doc, host) = setup(PAGE);
        let storage = MemoryStorage::new().with_file("/app.js", "var loaded = 'yes';");
        host.load_script(&storage, "/app.js").unwrap();
        assert_eq!(eval_as::<String>(&host, "loaded"), "yes");

        match host.load_script(&storage, "/missing.js") {
            Err(ScriptError::Storage { path, error }) => {
                assert_eq!(path, "/missing.js");
                assert_eq!(error, StorageError::NotFound);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
