use super::Generator;

use quarry_core::{
    stmt::{Frame, Query},
    Result,
};

impl Generator<'_> {
    /// Walks the frame list into a WHERE clause body. Join frames and empty
    /// groups render nothing; a frame's connector only appears once some
    /// earlier frame has produced output.
    pub(crate) fn render_where(&self, query: &Query) -> Result<String> {
        let mut out = String::new();

        for frame in &query.frames {
            let rendered = match frame {
                Frame::Condition(condition) => self.render_condition(query, condition)?,
                Frame::Group { query: sub, .. } => {
                    let inner = self.render_where(sub)?;
                    (!inner.is_empty()).then(|| format!("({inner})"))
                }
            };
            let Some(sql) = rendered else {
                continue;
            };
            if !out.is_empty() {
                out.push(' ');
                out.push_str(frame.connector().as_str());
                out.push(' ');
            }
            out.push_str(&sql);
        }

        Ok(out)
    }
}
