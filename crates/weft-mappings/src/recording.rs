use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::visitor::{MappedElementKind, MappingVisitor};

/// One [`MappingVisitor`] call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum MappingEvent {
    Namespaces {
        src: String,
        dst: Vec<String>,
    },
    Class {
        src_name: String,
    },
    Field {
        src_name: String,
        src_desc: String,
    },
    Method {
        src_name: String,
        src_desc: String,
    },
    MethodArg {
        arg_position: i32,
        lv_index: i32,
        src_name: Option<String>,
    },
    MethodVar {
        lvt_row_index: i32,
        lv_index: i32,
        start_op_idx: i32,
        end_op_idx: i32,
        src_name: Option<String>,
    },
    DstName {
        kind: MappedElementKind,
        namespace: usize,
        name: String,
    },
    Comment {
        kind: MappedElementKind,
        comment: String,
    },
    End,
}

/// Visitor that keeps every call it receives, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingVisitor {
    pub events: Vec<MappingEvent>,
}

impl RecordingVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_events(self) -> Vec<MappingEvent> {
        self.events
    }
}

impl MappingVisitor for RecordingVisitor {
    fn visit_namespaces(&mut self, src_namespace: &str, dst_namespaces: &[String]) -> Result<()> {
        self.events.push(MappingEvent::Namespaces {
            src: src_namespace.to_string(),
            dst: dst_namespaces.to_vec(),
        });
        Ok(())
    }

    fn visit_class(&mut self, src_name: &str) -> Result<bool> {
        self.events.push(MappingEvent::Class {
            src_name: src_name.to_string(),
        });
        Ok(true)
    }

    fn visit_field(&mut self, src_name: &str, src_desc: &str) -> Result<bool> {
        self.events.push(MappingEvent::Field {
            src_name: src_name.to_string(),
            src_desc: src_desc.to_string(),
        });
        Ok(true)
    }

    fn visit_method(&mut self, src_name: &str, src_desc: &str) -> Result<bool> {
        self.events.push(MappingEvent::Method {
            src_name: src_name.to_string(),
            src_desc: src_desc.to_string(),
        });
        Ok(true)
    }

    fn visit_method_arg(
        &mut self,
        arg_position: i32,
        lv_index: i32,
        src_name: Option<&str>,
    ) -> Result<bool> {
        self.events.push(MappingEvent::MethodArg {
            arg_position,
            lv_index,
            src_name: src_name.map(str::to_string),
        });
        Ok(true)
    }

    fn visit_method_var(
        &mut self,
        lvt_row_index: i32,
        lv_index: i32,
        start_op_idx: i32,
        end_op_idx: i32,
        src_name: Option<&str>,
    ) -> Result<bool> {
        self.events.push(MappingEvent::MethodVar {
            lvt_row_index,
            lv_index,
            start_op_idx,
            end_op_idx,
            src_name: src_name.map(str::to_string),
        });
        Ok(true)
    }

    fn visit_dst_name(
        &mut self,
        kind: MappedElementKind,
        namespace: usize,
        name: &str,
    ) -> Result<()> {
        self.events.push(MappingEvent::DstName {
            kind,
            namespace,
            name: name.to_string(),
        });
        Ok(())
    }

    fn visit_comment(&mut self, kind: MappedElementKind, comment: &str) -> Result<()> {
        self.events.push(MappingEvent::Comment {
            kind,
            comment: comment.to_string(),
        });
        Ok(())
    }

    fn visit_end(&mut self) -> Result<()> {
        self.events.push(MappingEvent::End);
        Ok(())
    }
}
