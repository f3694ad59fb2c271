//! HTML page rendering using Tera.
//!
//! Templates are compiled into the binary so the server has no runtime file
//! dependencies.

use tasklist_core::Task;
use tera::{Context, Tera};

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../templates/base.html")),
    ("index.html", include_str!("../templates/index.html")),
    ("edit.html", include_str!("../templates/edit.html")),
];

pub struct Templates {
    tera: Tera,
}

impl Templates {
    /// Parse the embedded templates
    pub fn new() -> tera::Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES.iter().copied())?;
        Ok(Self { tera })
    }

    /// Task list with the "add task" form
    pub fn index(&self, tasks: &[Task]) -> tera::Result<String> {
        let mut context = Context::new();
        context.insert("tasks", tasks);
        self.tera.render("index.html", &context)
    }

    /// Edit form for a single task
    pub fn edit(&self, task: &Task) -> tera::Result<String> {
        let mut context = Context::new();
        context.insert("task", task);
        self.tera.render("edit.html", &context)
    }
}
