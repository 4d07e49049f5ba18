/*
 * Copyright (c) 2022 Frank Fischer <frank-fischer@shadow-soft.de>
 *
 * This program is free software: you can redistribute it and/or
 * modify it under the terms of the GNU General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful, but
 * WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
 * General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see  <http://www.gnu.org/licenses/>
 */

use time::OffsetDateTime;

use rustop::opts;

use preflow::dimacs::{self, max::Instance};
use preflow::edgelist::{self, MOCK_SINK, MOCK_SOURCE};
use preflow::generate::Generator;
use preflow::maxflow::{self, PushRelabel};
use preflow::report::{self, Report};
use preflow::Network;

use log::{info, warn};
use std::error::Error;
use std::io;
use std::time::Duration;

/// Read or generate the network and determine source and sink.
fn load(
    file: Option<&str>,
    edgelist: Option<&str>,
    generator: Option<Generator>,
    source: Option<usize>,
    sink: Option<usize>,
) -> Result<(Network, usize, usize), Box<dyn Error>> {
    if let Some(gen) = generator {
        let net: Network = gen.generate();
        let n = net.num_nodes();
        return Ok((net, source.unwrap_or(0), sink.unwrap_or_else(|| n.saturating_sub(1))));
    }

    if let Some(path) = edgelist {
        let (net, is_mock) = edgelist::load_or_mock(path);
        if is_mock {
            if source.is_some() || sink.is_some() {
                warn!("Ignoring --source and --sink for the mock network");
            }
            return Ok((net, MOCK_SOURCE, MOCK_SINK));
        }
        let n = net.num_nodes();
        return Ok((net, source.unwrap_or(0), sink.unwrap_or_else(|| n.saturating_sub(1))));
    }

    let instance: Instance = match file {
        Some(path) => dimacs::max::read_from_file(path)?,
        None => dimacs::max::read(io::stdin().lock())?,
    };
    let src = source
        .or(instance.src)
        .ok_or(maxflow::Error::MissingTerminal("source"))?;
    let snk = sink.or(instance.snk).ok_or(maxflow::Error::MissingTerminal("sink"))?;
    Ok((instance.network, src, snk))
}

/// Verify capacity constraints, flow conservation and the flow value.
fn check(net: &Network, src: usize, snk: usize, value: i64) -> Result<(), Box<dyn Error>> {
    if let Some((u, a)) = net.edges().find(|(_, a)| a.flow() < 0 || a.flow() > a.cap()) {
        return Err(format!("capacity violated on edge ({},{})", u + 1, a.to() + 1).into());
    }
    if let Some(u) = (0..net.num_nodes()).find(|&u| u != src && u != snk && net.net_outflow(u) != 0) {
        return Err(format!("flow conservation violated at node {}", u + 1).into());
    }
    if net.net_outflow(src) != value || net.net_outflow(snk) != -value {
        return Err("flow value does not match source and sink balance".into());
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let (args, _) = opts! {
        synopsis "Solve a max-flow problem with the FIFO push-relabel algorithm.";
        opt edgelist:Option<String>, short:'e', desc:"Read an edge list dataset (mock network if unreadable).";
        opt generate:Option<usize>, short:'g', desc:"Generate a random network with this many nodes.";
        opt density:f64=0.1, short:'d', desc:"Edge probability of a random network.";
        opt min_cap:u32=1, short:'l', desc:"Smallest capacity of a random network.";
        opt max_cap:u32=100, short:'u', desc:"Largest capacity of a random network.";
        opt seed:u64=42, short:'r', desc:"Seed of a random network.";
        opt source:Option<usize>, short:'s', desc:"Source node (0-based, overrides the file).";
        opt sink:Option<usize>, short:'t', desc:"Sink node (0-based, overrides the file).";
        opt no_gap:bool, short:'n', desc:"Do not use the gap heuristic.";
        opt flow:bool, short:'f', desc:"Print the flow on each edge.";
        opt check:bool, short:'c', desc:"Verify the computed flow.";
        param file:Option<String>, desc:"DIMACS instance file (stdin if omitted).";
    }
    .parse_or_exit();

    let tstart = OffsetDateTime::now_utc();

    let generator = args.generate.map(|nodes| Generator {
        nodes,
        density: args.density,
        min_cap: args.min_cap,
        max_cap: args.max_cap,
        seed: args.seed,
    });
    let (mut net, src, snk) = load(
        args.file.as_deref(),
        args.edgelist.as_deref(),
        generator,
        args.source,
        args.sink,
    )?;

    info!("number of nodes: {}", net.num_nodes());
    info!("number of arcs: {}", net.num_edges());
    info!("source: {} sink: {}", src, snk);

    let tsolve = OffsetDateTime::now_utc();
    let mut pr = PushRelabel::new(&mut net);
    pr.use_gap_heuristic = !args.no_gap;
    let value = pr.solve(src, snk)?;
    let tend = OffsetDateTime::now_utc();

    info!(
        "discharges: {} pushes: {} relabels: {} gaps: {}",
        pr.cnt_discharge, pr.cnt_push, pr.cnt_relabel, pr.cnt_gap
    );

    println!(
        "{}",
        Report {
            value,
            elapsed: Some(Duration::from_secs_f64((tend - tsolve).as_seconds_f64().max(0.0))),
        }
    );

    if args.flow {
        report::write_flow(io::stdout().lock(), &net)?;
    }

    if args.check {
        check(&net, src, snk, value)?;
        info!("flow verified");
    }

    eprintln!(
        "Total time taken: {:.6} seconds",
        (OffsetDateTime::now_utc() - tstart).as_seconds_f64()
    );

    Ok(())
}
