use tsqlb::{
    BuildOptions, Column, DatePart, Order, Predicate, QualifyOptions, QueryFactory, Source,
    Statement, TableDefinition, Top, functions,
};

fn adventure_works() -> QueryFactory {
    QueryFactory::new(
        Source::new()
            .with(
                "c",
                TableDefinition::new("AdventureWorks2022", "Sales", "Customer")
                    .with_columns(["CustomerID", "CustomerName", "City", "Country"]),
            )
            .with(
                "p",
                TableDefinition::new("AdventureWorks2022", "Production", "Product").with_columns([
                    "ProductID",
                    "Name",
                    "ProductNumber",
                    "ListPrice",
                    "ProductModelID",
                ]),
            )
            .with(
                "sod",
                TableDefinition::new("AdventureWorks2022", "Sales", "SalesOrderDetail")
                    .with_columns([
                        "SalesOrderID",
                        "CarrierTrackingNumber",
                        "ProductID",
                        "OrderQty",
                        "UnitPrice",
                        "UnitPriceDiscount",
                    ]),
            )
            .with(
                "pm",
                TableDefinition::new("AdventureWorks2022", "Production", "ProductModel")
                    .with_columns(["ProductModelID", "Name"]),
            )
            .with(
                "e",
                TableDefinition::new("AdventureWorks2022", "HumanResources", "Employee")
                    .with_columns(["BusinessEntityID", "JobTitle"]),
            )
            .with("temp", TableDefinition::new("tempdb", "dbo", "#Bicycles"))
            .with(
                "newProds",
                TableDefinition::new("AdventureWorks2022", "dbo", "NewProducts")
                    .with_columns(["Id", "Name"]),
            ),
    )
}

fn schema_only() -> BuildOptions {
    BuildOptions::new().database_name(false)
}

fn schema_only_no_alias() -> BuildOptions {
    BuildOptions::unqualified().schema_name(true)
}

// ==================== Basic selection ====================

#[test]
fn select_all_customers() {
    let sql = adventure_works()
        .inline_select(BuildOptions::unqualified(), |q| {
            q.select_all_from("c").from("c");
        })
        .unwrap();
    assert_eq!(sql, "SELECT * FROM Customer");
}

#[test]
fn select_distinct_countries() {
    let sql = adventure_works()
        .inline_select(BuildOptions::unqualified(), |q| {
            q.distinct().select_column("c", "Country").from("c");
        })
        .unwrap();
    assert_eq!(sql, "SELECT DISTINCT Country FROM Customer");
}

#[test]
fn count_distinct_countries() {
    let sql = adventure_works()
        .inline_select(BuildOptions::unqualified(), |q| {
            let country = q.column("c", "Country");
            q.select(functions::count_distinct(country)).from("c");
        })
        .unwrap();
    assert_eq!(sql, "SELECT COUNT(DISTINCT Country) FROM Customer");
}

#[test]
fn customers_from_mexico() {
    let sql = adventure_works()
        .inline_select(BuildOptions::unqualified(), |q| {
            let from_mexico = q.column("c", "Country").is_equal_to("Mexico");
            q.select_all_from("c").from("c").where_clause(from_mexico);
        })
        .unwrap();
    assert_eq!(sql, "SELECT * FROM Customer WHERE Country = 'Mexico'");
}

#[test]
fn products_by_price_descending() {
    let sql = adventure_works()
        .inline_select(schema_only_no_alias(), |q| {
            q.select_all_from("p")
                .from("p")
                .order_by_column("p", "price", Order::Desc);
        })
        .unwrap();
    assert_eq!(sql, "SELECT * FROM Production.Product ORDER BY price DESC");
}

#[test]
fn products_by_name_with_alias() {
    let sql = adventure_works()
        .inline_select(schema_only(), |q| {
            q.select_all_from("p")
                .from("p")
                .order_by_column("p", "name", Order::Asc);
        })
        .unwrap();
    assert_eq!(sql, "SELECT p.* FROM Production.Product AS p ORDER BY p.name ASC");
}

#[test]
fn products_by_name_and_color() {
    let expected =
        "SELECT p.name, p.color, p.price FROM Production.Product AS p ORDER BY p.name ASC, p.color ASC";
    let factory = adventure_works();

    let mut one_by_one = factory.select(schema_only());
    one_by_one
        .select_column("p", "name")
        .select_column("p", "color")
        .select_column("p", "price")
        .from("p")
        .order_by_column("p", "name", Order::Asc)
        .order_by_column("p", "color", Order::Asc);
    assert_eq!(one_by_one.build().unwrap(), expected);

    let mut as_list = factory.select(schema_only());
    as_list
        .select_columns("p", &["name", "color", "price"])
        .from("p")
        .order_by_column("p", "name", Order::Asc)
        .order_by_column("p", "color", Order::Asc);
    assert_eq!(as_list.build().unwrap(), expected);
}

#[test]
fn column_alias_in_select_list() {
    let sql = adventure_works()
        .inline_select(schema_only_no_alias(), |q| {
            q.select_column("p", "Name")
                .select_column("p", "ProductNumber")
                .select_column_as("p", "ListPrice", "Price")
                .from("p")
                .order_by_column("p", "Name", Order::Asc);
        })
        .unwrap();
    assert_eq!(
        sql,
        "SELECT Name, ProductNumber, ListPrice AS Price FROM Production.Product ORDER BY Name ASC"
    );
}

// ==================== Joins and calculated columns ====================

#[test]
fn join_with_calculated_columns() {
    let sql = adventure_works()
        .inline_select(schema_only(), |q| {
            let product_name = q.column_as("p", "Name", "ProductName");
            let qty = q.column("sod", "OrderQty");
            let price = q.column("sod", "UnitPrice");
            let discount = q.column("sod", "UnitPriceDiscount");
            let sales = qty.multiplied_by(&price);
            let on = q.column("p", "ProductID").is_equal_to(q.column("sod", "ProductID"));

            q.select(&product_name)
                .select_as(&sales, "NonDiscountSales")
                .select_as(sales.multiplied_by(&discount), "Discounts")
                .from("p")
                .inner_join("sod", on)
                .order_by(&product_name, Order::Desc);
        })
        .unwrap();
    assert_eq!(
        sql,
        "SELECT p.Name AS ProductName, \
         (sod.OrderQty * sod.UnitPrice) AS NonDiscountSales, \
         ((sod.OrderQty * sod.UnitPrice) * sod.UnitPriceDiscount) AS Discounts \
         FROM Production.Product AS p \
         INNER JOIN Sales.SalesOrderDetail AS sod ON p.ProductID = sod.ProductID \
         ORDER BY ProductName DESC"
    );
}

#[test]
fn distinct_job_titles() {
    let sql = adventure_works()
        .inline_select(schema_only_no_alias(), |q| {
            q.distinct()
                .select_column("e", "JobTitle")
                .from("e")
                .order_by_column("e", "JobTitle", None);
        })
        .unwrap();
    assert_eq!(
        sql,
        "SELECT DISTINCT JobTitle FROM HumanResources.Employee ORDER BY JobTitle"
    );
}

#[test]
fn person_with_functions_and_date_range() {
    let source = Source::new()
        .with(
            "person",
            TableDefinition::new("MAIN_DB", "dbo", "Person").with_named_columns([
                ("id", Column::new("Id")),
                ("name", Column::new("Name")),
                ("lastname", Column::new("Lastname")),
                ("birthdate", Column::new("DateOfBirth")),
            ]),
        )
        .with(
            "address",
            TableDefinition::new("MAIN_DB", "dbo", "Address")
                .with_columns(["PersonId", "Line", "City"]),
        );
    let factory = QueryFactory::new(source);

    let sql = factory
        .inline_select(BuildOptions::new(), |q| {
            let id = q.column_as("person", "id", "personId");
            let birthdate = q.column("person", "birthdate");
            let fullname = functions::upper(functions::concat([
                q.column("person", "name"),
                " ".into(),
                q.column("person", "lastname"),
            ]));
            let age = functions::datediff(DatePart::Year, &birthdate, functions::getdate());
            let full_address = functions::concat([
                q.column("address", "Line"),
                ", ".into(),
                q.column("address", "City"),
            ]);
            let on = q.column("person", "id").is_equal_to(q.column("address", "PersonId"));
            let born = birthdate
                .is_greater_than("2000-01-01")
                .and(birthdate.is_less_than("2020-01-01"));

            q.select(id)
                .select_as(fullname, "personFullname")
                .select_as(age, "personAge")
                .select_as(full_address, "fullAddress")
                .from("person")
                .inner_join("address", on)
                .where_clause(born);
        })
        .unwrap();

    assert_eq!(
        sql,
        "SELECT person.Id AS personId, \
         UPPER(CONCAT(person.Name, ' ', person.Lastname)) AS personFullname, \
         DATEDIFF(year, person.DateOfBirth, GETDATE()) AS personAge, \
         CONCAT(address.Line, ', ', address.City) AS fullAddress \
         FROM MAIN_DB.dbo.Person AS person \
         INNER JOIN MAIN_DB.dbo.Address AS address ON person.Id = address.PersonId \
         WHERE person.DateOfBirth > '2000-01-01' AND person.DateOfBirth < '2020-01-01'"
    );
}

// ==================== INTO ====================

#[test]
fn select_into_temporary_table() {
    let sql = adventure_works()
        .inline_select(BuildOptions::new().table_alias(false), |q| {
            let is_bike = q.column("p", "ProductNumber").is_like("BK%");
            q.select_all_from("p")
                .into_table("temp", QualifyOptions::unqualified())
                .from("p")
                .where_clause(is_bike);
        })
        .unwrap();
    assert_eq!(
        sql,
        "SELECT * INTO #Bicycles FROM AdventureWorks2022.Production.Product \
         WHERE ProductNumber LIKE 'BK%'"
    );
}

#[test]
fn select_into_permanent_table() {
    let sql = adventure_works()
        .inline_select(schema_only_no_alias(), |q| {
            let price = q.column("p", "ListPrice");
            let in_range = price.is_greater_than(25).and(price.is_less_than(100));
            q.select_all_from("p")
                .into_table("newProds", QualifyOptions::new().database_name(false))
                .from("p")
                .where_clause(in_range);
        })
        .unwrap();
    assert_eq!(
        sql,
        "SELECT * INTO dbo.NewProducts FROM Production.Product \
         WHERE ListPrice > 25 AND ListPrice < 100"
    );
}

// ==================== Subqueries ====================

#[test]
fn correlated_exists_subquery() {
    let factory = adventure_works();
    let mut q = factory.select(schema_only());
    let parent_model = q.column("p", "ProductModelID");

    let jerseys = q
        .subquery(|sub| {
            let model = sub.column("pm", "ProductModelID");
            let matches = parent_model
                .is_equal_to(&model)
                .and(sub.column("pm", "Name").is_like("Long-Sleeve Logo Jersey%"));
            sub.select_all_from("pm").from("pm").where_clause(matches);
        })
        .unwrap();

    q.distinct()
        .select_column("p", "Name")
        .from("p")
        .where_clause(Predicate::exists(jerseys));

    assert_eq!(
        q.build().unwrap(),
        "SELECT DISTINCT p.Name FROM Production.Product AS p \
         WHERE EXISTS (SELECT pm.* FROM Production.ProductModel AS pm \
         WHERE p.ProductModelID = pm.ProductModelID \
         AND pm.Name LIKE 'Long-Sleeve Logo Jersey%')"
    );
}

#[test]
fn in_subquery() {
    let factory = adventure_works();
    let mut q = factory.select(schema_only());
    let parent_model = q.column("p", "ProductModelID");

    let jerseys = q
        .subquery(|sub| {
            let model = sub.column("pm", "ProductModelID");
            let matches = parent_model
                .is_equal_to(&model)
                .and(sub.column("pm", "Name").is_like("Long-Sleeve Logo Jersey%"));
            sub.select(&model).from("pm").where_clause(matches);
        })
        .unwrap();

    q.distinct()
        .select_column("p", "Name")
        .from("p")
        .where_clause(parent_model.is_in(jerseys));

    assert_eq!(
        q.build().unwrap(),
        "SELECT DISTINCT p.Name FROM Production.Product AS p \
         WHERE p.ProductModelID IN (SELECT pm.ProductModelID FROM Production.ProductModel AS pm \
         WHERE p.ProductModelID = pm.ProductModelID \
         AND pm.Name LIKE 'Long-Sleeve Logo Jersey%')"
    );
}

#[test]
fn subquery_is_independent_of_parent_registration_order() {
    let factory = adventure_works();

    let build = |parent_first: bool| {
        let mut q = factory.select(schema_only());
        let parent_model = q.column("p", "ProductModelID");
        if parent_first {
            q.select_column("p", "Name").from("p");
        }
        let sub = q
            .subquery(|s| {
                let model = s.column("pm", "ProductModelID");
                s.select(&model).from("pm").where_clause(parent_model.is_equal_to(&model));
            })
            .unwrap();
        q.where_clause(Predicate::not_exists(sub));
        if !parent_first {
            q.select_column("p", "Name").from("p");
        }
        q.build().unwrap()
    };

    assert_eq!(build(true), build(false));
}

// ==================== GROUP BY / HAVING ====================

#[test]
fn count_per_name() {
    let sql = adventure_works()
        .inline_select(schema_only(), |q| {
            let name = q.column("p", "Name");
            let count = functions::count(q.all_columns("p"));
            q.select(&name)
                .select_as(count, "ProductCount")
                .from("p")
                .group_by([&name]);
        })
        .unwrap();
    assert_eq!(
        sql,
        "SELECT p.Name, COUNT(p.*) AS ProductCount FROM Production.Product AS p GROUP BY p.Name"
    );
}

#[test]
fn average_price_per_model() {
    let sql = adventure_works()
        .inline_select(schema_only_no_alias(), |q| {
            let model = q.column("p", "ProductModelID");
            let price = q.column("p", "ListPrice");
            q.select(&model)
                .select_as(functions::avg(&price), "[Average List Price]")
                .from("p")
                .where_clause(price.is_greater_than(1000))
                .group_by([&model])
                .order_by(&model, None);
        })
        .unwrap();
    assert_eq!(
        sql,
        "SELECT ProductModelID, AVG(ListPrice) AS [Average List Price] \
         FROM Production.Product WHERE ListPrice > 1000 \
         GROUP BY ProductModelID ORDER BY ProductModelID"
    );
}

#[test]
fn group_by_calculated_expression() {
    let sql = adventure_works()
        .inline_select(schema_only_no_alias(), |q| {
            let qty = q.column("sod", "OrderQty");
            let sales = qty.multiplied_by(q.column("sod", "UnitPrice"));
            q.select_as(functions::avg(&qty), "[Average Quantity]")
                .select_as(&sales, "NonDiscountSales")
                .from("sod")
                .group_by([&sales])
                .order_by(&sales, Order::Desc);
        })
        .unwrap();
    assert_eq!(
        sql,
        "SELECT AVG(OrderQty) AS [Average Quantity], (OrderQty * UnitPrice) AS NonDiscountSales \
         FROM Sales.SalesOrderDetail \
         GROUP BY (OrderQty * UnitPrice) ORDER BY (OrderQty * UnitPrice) DESC"
    );
}

#[test]
fn order_by_aggregate() {
    let sql = adventure_works()
        .inline_select(schema_only_no_alias(), |q| {
            let product = q.column("sod", "ProductID");
            let avg_price = functions::avg(q.column("sod", "UnitPrice"));
            let big_orders = q.column("sod", "OrderQty").is_greater_than(10);
            q.select(&product)
                .select_as(&avg_price, "[Average Price]")
                .from("sod")
                .where_clause(big_orders)
                .group_by([&product])
                .order_by(&avg_price, None);
        })
        .unwrap();
    assert_eq!(
        sql,
        "SELECT ProductID, AVG(UnitPrice) AS [Average Price] FROM Sales.SalesOrderDetail \
         WHERE OrderQty > 10 GROUP BY ProductID ORDER BY AVG(UnitPrice)"
    );
}

#[test]
fn having_on_aggregate() {
    let sql = adventure_works()
        .inline_select(schema_only_no_alias(), |q| {
            let product = q.column("sod", "ProductID");
            let avg_qty = functions::avg(q.column("sod", "OrderQty"));
            q.select(&product)
                .from("sod")
                .group_by([&product])
                .having(avg_qty.is_greater_than(5))
                .order_by(&product, None);
        })
        .unwrap();
    assert_eq!(
        sql,
        "SELECT ProductID FROM Sales.SalesOrderDetail \
         GROUP BY ProductID HAVING AVG(OrderQty) > 5 ORDER BY ProductID"
    );
}

#[test]
fn having_with_like() {
    let sql = adventure_works()
        .inline_select(schema_only_no_alias(), |q| {
            let order = q.column("sod", "SalesOrderID");
            let tracking = q.column("sod", "CarrierTrackingNumber");
            q.select(&order)
                .select(&tracking)
                .from("sod")
                .group_by([&order, &tracking])
                .having(tracking.is_like("4BD%"))
                .order_by(&order, None);
        })
        .unwrap();
    assert_eq!(
        sql,
        "SELECT SalesOrderID, CarrierTrackingNumber FROM Sales.SalesOrderDetail \
         GROUP BY SalesOrderID, CarrierTrackingNumber \
         HAVING CarrierTrackingNumber LIKE '4BD%' ORDER BY SalesOrderID"
    );
}

#[test]
fn where_group_by_and_having() {
    let sql = adventure_works()
        .inline_select(schema_only_no_alias(), |q| {
            let product = q.column("sod", "ProductID");
            let cheap = q.column("sod", "UnitPrice").is_less_than(25);
            let avg_qty = functions::avg(q.column("sod", "OrderQty"));
            q.select(&product)
                .from("sod")
                .where_clause(cheap)
                .group_by([&product])
                .having(avg_qty.is_greater_than(5))
                .order_by(&product, None);
        })
        .unwrap();
    assert_eq!(
        sql,
        "SELECT ProductID FROM Sales.SalesOrderDetail WHERE UnitPrice < 25 \
         GROUP BY ProductID HAVING AVG(OrderQty) > 5 ORDER BY ProductID"
    );
}

// ==================== TOP ====================

#[test]
fn top_rows_and_percent() {
    let factory = adventure_works();
    let sql = factory
        .inline_select(schema_only(), |q| {
            q.top(Top::rows(10)).select_column("p", "ProductID").from("p");
        })
        .unwrap();
    assert_eq!(sql, "SELECT TOP (10) p.ProductID FROM Production.Product AS p");

    let sql = factory
        .inline_select(schema_only(), |q| {
            q.top(Top::percent(50)).distinct().select_column("p", "Name").from("p");
        })
        .unwrap();
    assert_eq!(
        sql,
        "SELECT DISTINCT TOP (50) PERCENT p.Name FROM Production.Product AS p"
    );
}
