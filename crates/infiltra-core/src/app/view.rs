impl<IN, IR> MenuApp<IN, IR>
where
    IN: InputSource,
    IR: IrReceiver,
{
    pub fn new(input: IN, ir_receiver: IR, config: UiConfig) -> Self {
        Self {
            input,
            edges: EdgeDetector::new(),
            state: NavigationState::new(),
            tools: ToolSet::new(ir_receiver),
            config,
            input_fault_logged: false,
        }
    }

    pub const fn state(&self) -> &NavigationState {
        &self.state
    }

    pub const fn current_menu(&self) -> MenuState {
        self.state.current_menu
    }

    pub const fn flags(&self) -> ModeFlags {
        self.state.flags
    }

    pub const fn tools(&self) -> &ToolSet<IR> {
        &self.tools
    }

    pub fn tools_mut(&mut self) -> &mut ToolSet<IR> {
        &mut self.tools
    }

    pub fn input_mut(&mut self) -> &mut IN {
        &mut self.input
    }

    /// Redraw for the first frame after boot.
    pub const fn initial_redraw(&self) -> RedrawCommand {
        RedrawCommand::Ring(self.state.current_menu.topic())
    }

    /// Resolves a redraw command against current state and paints it.
    pub fn present<S>(&mut self, redraw: RedrawCommand, now_ms: u64, surface: &mut S)
    where
        S: MenuSurface,
    {
        let cursor = self.state.cursor;
        match redraw {
            RedrawCommand::None => {}
            RedrawCommand::Ring(topic) => surface.draw_menu(MenuScreen::Ring {
                label: topic.label(),
                index: topic.index(),
                count: Topic::COUNT,
            }),
            RedrawCommand::Submenu { topic, layered } => surface.draw_menu(MenuScreen::Submenu {
                title: topic.label(),
                items: cursor.items(),
                cursor: cursor.selected_index() as usize,
                layered,
            }),
            RedrawCommand::SubmenuOptions(_) => surface.draw_menu(MenuScreen::SubmenuOptions {
                items: cursor.items(),
                cursor: cursor.selected_index() as usize,
            }),
            RedrawCommand::OptionDetail(topic) => surface.draw_menu(MenuScreen::OptionDetail {
                title: topic.label(),
                option: cursor.selected_label(),
                index: cursor.selected_index() as usize,
            }),
            RedrawCommand::Tool(kind) => {
                self.tools.get_mut(kind).draw_if_needed(surface, now_ms);
            }
            RedrawCommand::StopwatchTime => self.tools.stopwatch.draw_time(surface, now_ms),
        }
    }
}
