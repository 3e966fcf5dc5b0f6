impl<IN, IR> MenuApp<IN, IR>
where
    IN: InputSource,
    IR: IrReceiver,
{
    /// Samples input once, dispatches a single path and finalizes edges.
    pub fn tick(&mut self, now_ms: u64) -> TickResult {
        let raw = self.sample_input();
        self.edges.sample(raw);
        let edges = self.edges.edges();

        let result = self.dispatch(edges, now_ms);

        self.edges.finalize();
        result
    }

    fn sample_input(&mut self) -> RawButtons {
        match self.input.sample() {
            Ok(raw) => {
                if self.input_fault_logged {
                    info!("ui-nav: input source recovered");
                    self.input_fault_logged = false;
                }
                raw
            }
            Err(_) => {
                if !self.input_fault_logged {
                    info!("ui-nav: input sample failed, treating buttons as released");
                    self.input_fault_logged = true;
                }
                RawButtons::RELEASED
            }
        }
    }

    fn dispatch(&mut self, edges: Edges, now_ms: u64) -> TickResult {
        let flags = self.state.flags;
        let keyboard = self.config.surface == InputSurface::Keyboard;

        if flags.in_ir_read {
            let back = edges.c || (keyboard && edges.escape);
            let exit = self
                .tools
                .ir_read
                .handle_input(ToolEdges::new(edges.a, edges.b, back), now_ms);
            return self.tool_result(DispatchPath::IrRead, ToolKind::IrRead, exit);
        }

        if flags.in_bgone {
            let exit = self
                .tools
                .bgone
                .handle_input(ToolEdges::new(edges.a, edges.b, edges.c), now_ms);
            return self.tool_result(DispatchPath::BGone, ToolKind::BGone, exit);
        }

        if flags.in_stopwatch {
            let back = if keyboard { edges.escape } else { edges.c };
            let exit = self
                .tools
                .stopwatch
                .handle_input(ToolEdges::new(edges.a, edges.b, back), now_ms);
            if exit {
                return self.leave_tool(DispatchPath::Stopwatch, ToolKind::Stopwatch);
            }

            let redraw = if edges.a {
                RedrawCommand::Tool(ToolKind::Stopwatch)
            } else if self.tools.stopwatch.is_running() {
                RedrawCommand::StopwatchTime
            } else {
                RedrawCommand::None
            };
            return TickResult::new(DispatchPath::Stopwatch, redraw)
                .with_frame_delay(self.config.tool_frame_delay_ms);
        }

        if flags.in_option_screen {
            return self.dispatch_option_screen(edges);
        }

        match self.state.current_menu {
            MenuState::Submenu(topic) => self.dispatch_submenu(topic, edges, now_ms),
            MenuState::Menu(topic) => self.dispatch_ring(topic, edges, now_ms),
        }
    }

    fn tool_result(&mut self, path: DispatchPath, kind: ToolKind, exit: bool) -> TickResult {
        if exit {
            return self.leave_tool(path, kind);
        }
        TickResult::new(path, RedrawCommand::Tool(kind))
            .with_frame_delay(self.config.tool_frame_delay_ms)
    }

    fn leave_tool(&mut self, path: DispatchPath, kind: ToolKind) -> TickResult {
        self.state.flags.set_tool(kind, false);
        let topic = self.state.current_menu.topic();
        debug!("ui-nav: leave {:?} -> {} submenu", kind, topic.label());
        TickResult::new(
            path,
            RedrawCommand::Submenu {
                topic,
                layered: self.config.surface == InputSurface::Keyboard,
            },
        )
    }

    fn dispatch_option_screen(&mut self, edges: Edges) -> TickResult {
        let path = if edges.c {
            DispatchPath::OptionBack
        } else if edges.a && self.state.cursor.selected_index() == 0 {
            DispatchPath::OptionConfirm
        } else {
            return TickResult::new(DispatchPath::Idle, RedrawCommand::None);
        };

        self.state.flags.in_option_screen = false;
        let topic = self.state.current_menu.topic();
        debug!("ui-nav: close option screen ({:?})", path);
        TickResult::new(
            path,
            RedrawCommand::Submenu {
                topic,
                layered: false,
            },
        )
    }

    fn dispatch_submenu(&mut self, topic: Topic, edges: Edges, now_ms: u64) -> TickResult {
        let redraw = if edges.b {
            self.state.cursor.next();
            RedrawCommand::SubmenuOptions(topic)
        } else if edges.c {
            self.state.cursor.previous();
            RedrawCommand::SubmenuOptions(topic)
        } else if edges.a {
            let index = self.state.cursor.selected_index();
            if index == 0 {
                self.state.current_menu = MenuState::Menu(topic);
                debug!("ui-nav: back to ring at {}", topic.label());
                RedrawCommand::Ring(topic)
            } else {
                self.route_submenu_action(topic, index, now_ms)
            }
        } else {
            RedrawCommand::None
        };

        TickResult::new(DispatchPath::SubmenuBrowse, redraw)
    }

    fn dispatch_ring(&mut self, topic: Topic, edges: Edges, now_ms: u64) -> TickResult {
        let entry = topic.entry();
        let target = if edges.b {
            Some(entry.advance)
        } else if edges.c {
            Some(entry.retreat)
        } else {
            None
        };

        if let Some(target) = target
            && self.ring_step_allowed(now_ms)
        {
            self.state.last_ring_step_ms = Some(now_ms);
            self.state.current_menu = MenuState::Menu(target);
            debug!("ui-nav: ring {} -> {}", topic.label(), target.label());
            return TickResult::new(DispatchPath::RingBrowse, RedrawCommand::Ring(target));
        }

        if edges.a {
            self.state.current_menu = MenuState::Submenu(topic);
            self.state.cursor.set_topic(topic);
            debug!("ui-nav: enter {} submenu", topic.label());
            return TickResult::new(
                DispatchPath::EnterSubmenu,
                RedrawCommand::Submenu {
                    topic,
                    layered: false,
                },
            );
        }

        TickResult::new(DispatchPath::RingBrowse, RedrawCommand::None)
    }

    fn ring_step_allowed(&self, now_ms: u64) -> bool {
        match self.state.last_ring_step_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= self.config.ring_throttle_ms,
        }
    }
}
