use pretty::RcDoc;

pub trait Pretty {
    fn to_doc(&self) -> RcDoc<'_, ()>;

    fn to_pretty(&self, width: usize) -> String {
        let mut w = String::new();

        // Writing into a String cannot fail
        let _ = self.to_doc().render_fmt(width, &mut w);

        w
    }
}
