use html_escape::encode_double_quoted_attribute;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: Option<String>,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: Option<String>) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub self_closing: bool,
}

impl Tag {
    pub fn new(name: impl Into<String>, attributes: Vec<Attribute>) -> Self {
        Self {
            name: name.into(),
            attributes,
            self_closing: false,
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.attributes
            .iter()
            .position(|attribute| attribute.name.eq_ignore_ascii_case(name))
    }

    /// Value of the first attribute named `name`. A valueless attribute
    /// (`<input checked>`) yields `None`, same as a missing one.
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.position(name)
            .and_then(|index| self.attributes[index].value.as_deref())
    }

    pub fn non_empty_attr(&self, name: &str) -> Option<&str> {
        self.get_attr(name).filter(|value| !value.is_empty())
    }

    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let attribute = Attribute::new(name, Some(value.into()));
        match self.position(name) {
            Some(index) => self.attributes[index] = attribute,
            None => self.attributes.push(attribute),
        }
    }

    pub fn remove_attr(&mut self, name: &str) {
        if let Some(index) = self.position(name) {
            self.attributes.remove(index);
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.name.len() + 2 + self.attributes.len() * 16);
        out.push('<');
        out.push_str(&self.name);
        for attribute in &self.attributes {
            out.push(' ');
            out.push_str(&attribute.name);
            if let Some(value) = &attribute.value {
                out.push_str("=\"");
                out.push_str(&encode_double_quoted_attribute(value));
                out.push('"');
            }
        }
        if self.self_closing {
            out.push_str(" />");
        } else {
            out.push('>');
        }
        out
    }
}
