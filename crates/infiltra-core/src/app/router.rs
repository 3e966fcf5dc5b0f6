/// Tool bound to a submenu row, if any.
pub fn tool_for_option(topic: Topic, index: u8) -> Option<ToolKind> {
    SUBMENU_TOOLS
        .iter()
        .find(|(row_topic, row_index, _)| *row_topic == topic && *row_index == index)
        .map(|(_, _, kind)| *kind)
}

impl<IN, IR> MenuApp<IN, IR>
where
    IN: InputSource,
    IR: IrReceiver,
{
    /// Opens the tool bound to `(topic, index)` or the generic option screen.
    fn route_submenu_action(&mut self, topic: Topic, index: u8, now_ms: u64) -> RedrawCommand {
        match tool_for_option(topic, index) {
            Some(kind) => {
                self.tools.get_mut(kind).reset(now_ms);
                self.state.flags.set_tool(kind, true);
                debug!("ui-nav: open {:?} from {}[{}]", kind, topic.label(), index);
                RedrawCommand::Tool(kind)
            }
            None => {
                self.state.flags.in_option_screen = true;
                debug!(
                    "ui-nav: option {}[{}] {}",
                    topic.label(),
                    index,
                    self.state.cursor.selected_label()
                );
                RedrawCommand::OptionDetail(topic)
            }
        }
    }
}
